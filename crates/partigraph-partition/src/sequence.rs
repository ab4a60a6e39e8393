//! Lazy filtering over backend enumerations.
//!
//! [`PartitionVertices`] and [`PartitionEdges`] pull from a backend iterator,
//! drop elements outside the read partitions and yield wrappers. They hold at
//! most one element of lookahead, so [`has_next`](PartitionVertices::has_next)
//! can answer without losing anything.

use std::fmt;

use partigraph_core::{Element, ElementIter, Graph, Value};

use crate::element::{PartitionEdge, PartitionElement, PartitionVertex};
use crate::graph::PartitionGraph;
use crate::state::StateCell;

/// One element of lookahead over a backend iterator.
struct Lookahead<'a, T> {
    inner: ElementIter<'a, T>,
    peeked: Option<(T, Option<Value>)>,
}

impl<'a, T: Element> Lookahead<'a, T> {
    fn new(inner: ElementIter<'a, T>) -> Self {
        Self {
            inner,
            peeked: None,
        }
    }

    /// Advance to the next visible element, keeping it buffered.
    fn fill<G: Graph, S: StateCell>(&mut self, graph: &PartitionGraph<G, S>) -> bool {
        if self.peeked.is_some() {
            return true;
        }
        for element in self.inner.by_ref() {
            if let Some(tag) = graph.admit(&element) {
                self.peeked = Some((element, tag));
                return true;
            }
        }
        false
    }

    fn take<G: Graph, S: StateCell>(
        &mut self,
        graph: &PartitionGraph<G, S>,
    ) -> Option<(T, Option<Value>)> {
        if self.fill(graph) {
            self.peeked.take()
        } else {
            None
        }
    }
}

/// Readable vertices of a partition view.
pub struct PartitionVertices<'a, 'g, G: Graph, S> {
    graph: &'g PartitionGraph<G, S>,
    source: Lookahead<'a, G::Vertex>,
}

impl<'a, 'g, G: Graph, S: StateCell> PartitionVertices<'a, 'g, G, S> {
    pub(crate) fn new(inner: ElementIter<'a, G::Vertex>, graph: &'g PartitionGraph<G, S>) -> Self {
        Self {
            graph,
            source: Lookahead::new(inner),
        }
    }

    /// Whether another readable vertex remains.
    ///
    /// May pull from the backend, but never skips a readable vertex.
    pub fn has_next(&mut self) -> bool {
        self.source.fill(self.graph)
    }
}

impl<'g, G: Graph, S: StateCell> Iterator for PartitionVertices<'_, 'g, G, S> {
    type Item = PartitionVertex<'g, G, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let (vertex, tag) = self.source.take(self.graph)?;
        Some(PartitionElement::new(self.graph, vertex, tag))
    }
}

impl<G: Graph, S> fmt::Debug for PartitionVertices<'_, '_, G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionVertices")
            .field("peeked", &self.source.peeked)
            .finish_non_exhaustive()
    }
}

/// Readable edges of a partition view.
pub struct PartitionEdges<'a, 'g, G: Graph, S> {
    graph: &'g PartitionGraph<G, S>,
    source: Lookahead<'a, G::Edge>,
}

impl<'a, 'g, G: Graph, S: StateCell> PartitionEdges<'a, 'g, G, S> {
    pub(crate) fn new(inner: ElementIter<'a, G::Edge>, graph: &'g PartitionGraph<G, S>) -> Self {
        Self {
            graph,
            source: Lookahead::new(inner),
        }
    }

    /// Whether another readable edge remains.
    ///
    /// May pull from the backend, but never skips a readable edge.
    pub fn has_next(&mut self) -> bool {
        self.source.fill(self.graph)
    }
}

impl<'g, G: Graph, S: StateCell> Iterator for PartitionEdges<'_, 'g, G, S> {
    type Item = PartitionEdge<'g, G, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let (edge, tag) = self.source.take(self.graph)?;
        Some(PartitionElement::new(self.graph, edge, tag))
    }
}

impl<G: Graph, S> fmt::Debug for PartitionEdges<'_, '_, G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionEdges")
            .field("peeked", &self.source.peeked)
            .finish_non_exhaustive()
    }
}
