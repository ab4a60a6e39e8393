//! Graph capability contract.
//!
//! Defines the synchronous interface a storage backend must offer so that
//! decorators (such as partition views) can be layered on top of it.

use std::fmt;
use std::hash::Hash;

use crate::error::GraphError;
use crate::types::{Direction, ElementId, ElementIter, Value};

/// A vertex or edge handle.
///
/// Handles are cheap to clone and compare by identity: two handles are equal
/// iff they refer to the same element of the same graph.
pub trait Element: Clone + Eq + Hash + fmt::Debug {
    /// The element's id.
    fn id(&self) -> ElementId;

    /// Read a property, `None` if the key is not set.
    fn property(&self, key: &str) -> Option<Value>;

    /// Keys of all properties currently set on the element.
    fn property_keys(&self) -> Vec<String>;

    /// Set a property, replacing any previous value.
    fn set_property(&self, key: &str, value: Value) -> Result<(), GraphError>;

    /// Remove a property, returning the previous value if there was one.
    fn remove_property(&self, key: &str) -> Result<Option<Value>, GraphError>;
}

/// A vertex handle.
pub trait Vertex: Element {
    /// Edge handle type of the owning graph.
    type Edge: Edge;

    /// Edges incident to this vertex.
    ///
    /// # Arguments
    /// * `direction` - Which side of the edge this vertex must be on
    /// * `labels` - Only edges with one of these labels; empty means all
    fn edges(
        &self,
        direction: Direction,
        labels: &[&str],
    ) -> Result<ElementIter<'_, Self::Edge>, GraphError>;
}

/// An edge handle.
pub trait Edge: Element {
    /// Vertex handle type of the owning graph.
    type Vertex: Vertex;

    /// The edge label.
    fn label(&self) -> String;

    /// The source vertex.
    fn out_vertex(&self) -> Result<Self::Vertex, GraphError>;

    /// The target vertex.
    fn in_vertex(&self) -> Result<Self::Vertex, GraphError>;

    /// The vertex on the given side of the edge.
    ///
    /// `Direction::Both` is not a single vertex and resolves to the source.
    fn vertex(&self, direction: Direction) -> Result<Self::Vertex, GraphError> {
        match direction {
            Direction::In => self.in_vertex(),
            Direction::Out | Direction::Both => self.out_vertex(),
        }
    }
}

/// A property graph storage backend.
///
/// All methods take `&self`; backends that mutate state use interior
/// mutability. Errors are reported through [`GraphError`].
pub trait Graph {
    /// Vertex handle type.
    type Vertex: Vertex<Edge = Self::Edge>;

    /// Edge handle type.
    type Edge: Edge<Vertex = Self::Vertex>;

    /// Create a vertex.
    ///
    /// # Arguments
    /// * `id` - Requested id; `None` lets the backend choose one
    ///
    /// # Errors
    /// Backends typically fail with [`GraphError::DuplicateKey`] when the id
    /// is already taken.
    fn add_vertex(&self, id: Option<ElementId>) -> Result<Self::Vertex, GraphError>;

    /// Fetch a vertex by id.
    fn vertex(&self, id: &ElementId) -> Result<Option<Self::Vertex>, GraphError>;

    /// Enumerate all vertices.
    fn vertices(&self) -> Result<ElementIter<'_, Self::Vertex>, GraphError>;

    /// Remove a vertex and its incident edges.
    fn remove_vertex(&self, vertex: &Self::Vertex) -> Result<(), GraphError>;

    /// Create an edge from `out_vertex` to `in_vertex`.
    fn add_edge(
        &self,
        id: Option<ElementId>,
        out_vertex: &Self::Vertex,
        in_vertex: &Self::Vertex,
        label: &str,
    ) -> Result<Self::Edge, GraphError>;

    /// Fetch an edge by id.
    fn edge(&self, id: &ElementId) -> Result<Option<Self::Edge>, GraphError>;

    /// Enumerate all edges.
    fn edges(&self) -> Result<ElementIter<'_, Self::Edge>, GraphError>;

    /// Remove an edge.
    fn remove_edge(&self, edge: &Self::Edge) -> Result<(), GraphError>;

    /// Remove every vertex and edge.
    fn clear(&self) -> Result<(), GraphError>;

    /// Release backend resources. Later calls may fail.
    fn shutdown(&self) -> Result<(), GraphError>;
}

/// Forwarding implementation so a borrowed backend can be decorated.
impl<G> Graph for &G
where
    G: Graph + ?Sized,
{
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn add_vertex(&self, id: Option<ElementId>) -> Result<Self::Vertex, GraphError> {
        (**self).add_vertex(id)
    }

    fn vertex(&self, id: &ElementId) -> Result<Option<Self::Vertex>, GraphError> {
        (**self).vertex(id)
    }

    fn vertices(&self) -> Result<ElementIter<'_, Self::Vertex>, GraphError> {
        (**self).vertices()
    }

    fn remove_vertex(&self, vertex: &Self::Vertex) -> Result<(), GraphError> {
        (**self).remove_vertex(vertex)
    }

    fn add_edge(
        &self,
        id: Option<ElementId>,
        out_vertex: &Self::Vertex,
        in_vertex: &Self::Vertex,
        label: &str,
    ) -> Result<Self::Edge, GraphError> {
        (**self).add_edge(id, out_vertex, in_vertex, label)
    }

    fn edge(&self, id: &ElementId) -> Result<Option<Self::Edge>, GraphError> {
        (**self).edge(id)
    }

    fn edges(&self) -> Result<ElementIter<'_, Self::Edge>, GraphError> {
        (**self).edges()
    }

    fn remove_edge(&self, edge: &Self::Edge) -> Result<(), GraphError> {
        (**self).remove_edge(edge)
    }

    fn clear(&self) -> Result<(), GraphError> {
        (**self).clear()
    }

    fn shutdown(&self) -> Result<(), GraphError> {
        (**self).shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;

    fn count_vertices<G: Graph>(graph: G) -> usize {
        graph.vertices().map(|it| it.count()).unwrap_or(0)
    }

    #[test]
    fn test_borrowed_graph_forwards() {
        let graph = MemoryGraph::new();
        graph.add_vertex(None).unwrap();
        graph.add_vertex(None).unwrap();

        assert_eq!(count_vertices(&graph), 2);
        assert_eq!(count_vertices(&&graph), 2);
    }

    #[test]
    fn test_edge_vertex_by_direction() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(Some("a".into())).unwrap();
        let b = graph.add_vertex(Some("b".into())).unwrap();
        let e = graph.add_edge(None, &a, &b, "knows").unwrap();

        assert_eq!(e.vertex(Direction::Out).unwrap(), a);
        assert_eq!(e.vertex(Direction::In).unwrap(), b);
    }
}
