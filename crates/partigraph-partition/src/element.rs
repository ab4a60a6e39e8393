//! Element wrappers handed out by a partition view.
//!
//! A [`PartitionElement`] pairs a backend element with the view that produced
//! it and a cached copy of its partition tag. The partition property itself is
//! hidden from generic property access: it can be read through
//! [`property`](PartitionElement::property) but is never listed by
//! [`property_keys`](PartitionElement::property_keys).

use std::fmt;
use std::hash::{Hash, Hasher};

use partigraph_core::{Direction, Edge, Element, ElementId, Graph, GraphError, Value, Vertex};
use tracing::trace;

use crate::graph::{Candidate, PartitionGraph};
use crate::sequence::PartitionEdges;
use crate::state::{LocalState, StateCell};

/// A backend element seen through a partition view.
pub struct PartitionElement<'g, E, G, S> {
    graph: &'g PartitionGraph<G, S>,
    base: E,
    partition: Option<Value>,
}

/// A vertex seen through a partition view.
pub type PartitionVertex<'g, G, S = LocalState> =
    PartitionElement<'g, <G as Graph>::Vertex, G, S>;

/// An edge seen through a partition view.
pub type PartitionEdge<'g, G, S = LocalState> = PartitionElement<'g, <G as Graph>::Edge, G, S>;

impl<'g, E: Element, G: Graph, S: StateCell> PartitionElement<'g, E, G, S> {
    pub(crate) fn new(graph: &'g PartitionGraph<G, S>, base: E, partition: Option<Value>) -> Self {
        Self {
            graph,
            base,
            partition,
        }
    }

    /// The view this element belongs to.
    pub fn graph(&self) -> &'g PartitionGraph<G, S> {
        self.graph
    }

    /// The wrapped backend element.
    pub fn base(&self) -> &E {
        &self.base
    }

    /// Unwrap, returning the backend element.
    pub fn into_base(self) -> E {
        self.base
    }

    pub fn id(&self) -> ElementId {
        self.base.id()
    }

    /// The owning partition, `None` for untagged elements.
    ///
    /// A partition property holding a non-string value also reads as `None`;
    /// use [`property`](Self::property) to see the raw value.
    pub fn partition(&self) -> Option<&str> {
        self.partition.as_ref().and_then(Value::as_str)
    }

    /// This element as a membership candidate.
    pub fn candidate(&self) -> Candidate<'_, E> {
        Candidate::Wrapped(self.partition.as_ref())
    }

    /// Whether the element is visible through its view right now.
    ///
    /// Wrappers stay usable after the view's read partitions change, so this
    /// can be `false` for an element obtained earlier.
    pub fn is_visible(&self) -> bool {
        self.graph.is_in_partition(self.candidate())
    }

    /// Read a property. The partition key is answered from the cached tag.
    pub fn property(&self, key: &str) -> Option<Value> {
        if self.graph.is_partition_key(key) {
            self.partition.clone()
        } else {
            self.base.property(key)
        }
    }

    /// Property keys, excluding the partition key.
    pub fn property_keys(&self) -> Vec<String> {
        let partition_key = self.graph.partition_key();
        self.base
            .property_keys()
            .into_iter()
            .filter(|key| *key != partition_key)
            .collect()
    }

    /// Set a property.
    ///
    /// Setting the partition key moves the element to another partition.
    pub fn set_property(&mut self, key: &str, value: Value) -> Result<(), GraphError> {
        if self.graph.is_partition_key(key) {
            self.base.set_property(key, value.clone())?;
            trace!("Retagged {:?} to {}", self.base.id(), value);
            self.partition = Some(value);
            Ok(())
        } else {
            self.base.set_property(key, value)
        }
    }

    /// Remove a property, returning the previous value.
    ///
    /// Removing the partition key leaves the element untagged, which makes it
    /// visible to every view.
    pub fn remove_property(&mut self, key: &str) -> Result<Option<Value>, GraphError> {
        let removed = self.base.remove_property(key)?;
        if self.graph.is_partition_key(key) {
            trace!("Untagged {:?}", self.base.id());
            self.partition = None;
        }
        Ok(removed)
    }

    /// Move the element to `partition`.
    pub fn set_partition(&mut self, partition: impl Into<String>) -> Result<(), GraphError> {
        let key = self.graph.partition_key();
        self.set_property(&key, Value::String(partition.into()))
    }
}

impl<'g, G: Graph, S: StateCell> PartitionElement<'g, G::Vertex, G, S> {
    /// Readable edges on the given side of this vertex.
    ///
    /// # Arguments
    /// * `direction` - Which side of the edge this vertex must be on
    /// * `labels` - Only edges with one of these labels; empty means all
    pub fn edges(
        &self,
        direction: Direction,
        labels: &[&str],
    ) -> Result<PartitionEdges<'_, 'g, G, S>, GraphError> {
        Ok(PartitionEdges::new(
            self.base.edges(direction, labels)?,
            self.graph,
        ))
    }

    /// Readable outgoing edges.
    pub fn out_edges(&self, labels: &[&str]) -> Result<PartitionEdges<'_, 'g, G, S>, GraphError> {
        self.edges(Direction::Out, labels)
    }

    /// Readable incoming edges.
    pub fn in_edges(&self, labels: &[&str]) -> Result<PartitionEdges<'_, 'g, G, S>, GraphError> {
        self.edges(Direction::In, labels)
    }
}

impl<'g, G: Graph, S: StateCell> PartitionElement<'g, G::Edge, G, S> {
    pub fn label(&self) -> String {
        self.base.label()
    }

    /// The source vertex.
    ///
    /// The endpoint is wrapped as-is; it may lie outside the read partitions.
    pub fn out_vertex(&self) -> Result<PartitionVertex<'g, G, S>, GraphError> {
        Ok(self.graph.wrap_vertex(self.base.out_vertex()?))
    }

    /// The target vertex. Not filtered, like [`out_vertex`](Self::out_vertex).
    pub fn in_vertex(&self) -> Result<PartitionVertex<'g, G, S>, GraphError> {
        Ok(self.graph.wrap_vertex(self.base.in_vertex()?))
    }

    /// The vertex on the given side; `Both` resolves to the source.
    pub fn vertex(&self, direction: Direction) -> Result<PartitionVertex<'g, G, S>, GraphError> {
        Ok(self.graph.wrap_vertex(self.base.vertex(direction)?))
    }
}

impl<E: Clone, G, S> Clone for PartitionElement<'_, E, G, S> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            base: self.base.clone(),
            partition: self.partition.clone(),
        }
    }
}

impl<E: PartialEq, G, S> PartialEq for PartitionElement<'_, E, G, S> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<E: Eq, G, S> Eq for PartitionElement<'_, E, G, S> {}

impl<E: Hash, G, S> Hash for PartitionElement<'_, E, G, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl<E: fmt::Debug, G, S> fmt::Debug for PartitionElement<'_, E, G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionElement")
            .field("base", &self.base)
            .field("partition", &self.partition)
            .finish()
    }
}

impl<E: fmt::Display, G, S> fmt::Display for PartitionElement<'_, E, G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}
