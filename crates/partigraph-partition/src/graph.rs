//! The partition facade.
//!
//! [`PartitionGraph`] wraps any [`Graph`] backend. Every element it creates
//! is stamped with the current write partition under the partition key, and
//! every element it hands out has passed the read-partition filter.

use std::collections::HashSet;
use std::fmt;

use partigraph_config::{ConfigError, PartitionSettings};
use partigraph_core::{Element, ElementId, Graph, GraphError, Value};
use tracing::{debug, trace};

use crate::element::{PartitionEdge, PartitionElement, PartitionVertex};
use crate::sequence::{PartitionEdges, PartitionVertices};
use crate::state::{LocalState, PartitionState, SharedState, StateCell};

/// Something whose partition membership can be tested.
#[derive(Debug)]
pub enum Candidate<'e, E> {
    /// A wrapper's cached partition tag (`None` for untagged elements).
    Wrapped(Option<&'e Value>),
    /// A raw backend element, whose tag is read under the current key.
    Raw(&'e E),
}

// Manual impls: derive would require `E: Clone`.
impl<E> Clone for Candidate<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Candidate<'_, E> {}

/// A partition-scoped view over a graph backend.
///
/// `S` selects how the partition state is stored. With the default
/// [`LocalState`] the state setters take `&mut self`, so no wrapper can be
/// alive while the view is reconfigured. [`SharedPartitionGraph`] uses
/// [`SharedState`] instead and can be reconfigured through `&self`.
pub struct PartitionGraph<G, S = LocalState> {
    base: G,
    state: S,
}

/// A partition view whose state can be changed while shared across threads.
pub type SharedPartitionGraph<G> = PartitionGraph<G, SharedState>;

impl<G: Graph, S: StateCell> PartitionGraph<G, S> {
    /// Create a view writing to `write_partition` and reading `read_partitions`.
    pub fn new<I, P>(
        base: G,
        partition_key: impl Into<String>,
        write_partition: impl Into<String>,
        read_partitions: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let state = PartitionState::new(partition_key, write_partition, read_partitions);
        debug!(
            "Created partition view: key={} write={} read={:?}",
            state.partition_key(),
            state.write_partition(),
            state.read_partitions()
        );
        Self {
            base,
            state: S::from(state),
        }
    }

    /// Create a view that reads and writes the single partition `read_write`.
    pub fn with_partition(
        base: G,
        partition_key: impl Into<String>,
        read_write: impl Into<String>,
    ) -> Self {
        let read_write = read_write.into();
        Self::new(base, partition_key, read_write.clone(), [read_write])
    }

    /// Create a view from loaded configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the settings do not validate.
    pub fn from_settings(base: G, settings: &PartitionSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::new(
            base,
            settings.key.clone(),
            settings.write.clone(),
            settings.read_partitions(),
        ))
    }

    /// The wrapped backend.
    pub fn base_graph(&self) -> &G {
        &self.base
    }

    /// Unwrap the view, returning the backend.
    pub fn into_inner(self) -> G {
        self.base
    }

    /// Current partition key.
    pub fn partition_key(&self) -> String {
        self.state.with_state(|s| s.partition_key().to_string())
    }

    /// Current write partition.
    pub fn write_partition(&self) -> String {
        self.state.with_state(|s| s.write_partition().to_string())
    }

    /// Snapshot of the read partitions.
    ///
    /// Changing the returned set does not affect the view.
    pub fn read_partitions(&self) -> HashSet<String> {
        self.state.with_state(|s| s.read_partitions().clone())
    }

    /// Snapshot of the whole partition state.
    pub fn state(&self) -> PartitionState {
        self.state.with_state(PartitionState::clone)
    }

    /// Whether a candidate is visible through this view.
    ///
    /// Untagged elements are always visible. A tagged element is visible iff
    /// its tag is one of the read partitions.
    pub fn is_in_partition<E: Element>(&self, candidate: Candidate<'_, E>) -> bool {
        self.state.with_state(|s| match candidate {
            Candidate::Wrapped(tag) => s.is_readable_value(tag),
            Candidate::Raw(element) => s.is_readable_value(s.tag_of(element).as_ref()),
        })
    }

    pub(crate) fn is_partition_key(&self, key: &str) -> bool {
        self.state.with_state(|s| s.partition_key() == key)
    }

    /// Read an element's tag and test it in one step.
    ///
    /// Returns `Some(tag)` when the element is visible, `None` otherwise.
    pub(crate) fn admit<E: Element>(&self, element: &E) -> Option<Option<Value>> {
        self.state.with_state(|s| {
            let tag = s.tag_of(element);
            if s.is_readable_value(tag.as_ref()) {
                Some(tag)
            } else {
                trace!(
                    "Filtered {:?}: partition {:?} not readable",
                    element.id(),
                    tag
                );
                None
            }
        })
    }

    /// Wrap a backend vertex without checking visibility.
    pub fn wrap_vertex(&self, vertex: G::Vertex) -> PartitionVertex<'_, G, S> {
        let tag = self.state.with_state(|s| s.tag_of(&vertex));
        PartitionElement::new(self, vertex, tag)
    }

    /// Wrap a backend edge without checking visibility.
    pub fn wrap_edge(&self, edge: G::Edge) -> PartitionEdge<'_, G, S> {
        let tag = self.state.with_state(|s| s.tag_of(&edge));
        PartitionElement::new(self, edge, tag)
    }

    /// Stamp a freshly created element with the write partition.
    fn stamp<E: Element>(&self, element: &E) -> Result<Value, GraphError> {
        let (key, write) = self.state.with_state(|s| {
            (
                s.partition_key().to_string(),
                Value::from(s.write_partition()),
            )
        });
        element.set_property(&key, write.clone())?;
        trace!("Tagged {:?} with {}={}", element.id(), key, write);
        Ok(write)
    }

    fn assert_owned<E: Element>(&self, element: &PartitionElement<'_, E, G, S>) {
        assert!(
            std::ptr::eq(element.graph(), self),
            "element was produced by a different partition graph"
        );
    }

    /// Create a vertex in the write partition.
    ///
    /// # Errors
    /// Backend errors are propagated. If tagging fails after the backend
    /// created the vertex, the vertex is left in place untagged.
    pub fn add_vertex(&self, id: Option<ElementId>) -> Result<PartitionVertex<'_, G, S>, GraphError> {
        let vertex = self.base.add_vertex(id)?;
        let tag = self.stamp(&vertex)?;
        debug!("Added vertex {} to partition {}", vertex.id(), tag);
        Ok(PartitionElement::new(self, vertex, Some(tag)))
    }

    /// Fetch a vertex by id, `None` if absent or not readable.
    pub fn vertex(&self, id: &ElementId) -> Result<Option<PartitionVertex<'_, G, S>>, GraphError> {
        Ok(self.base.vertex(id)?.and_then(|vertex| {
            self.admit(&vertex)
                .map(|tag| PartitionElement::new(self, vertex, tag))
        }))
    }

    /// Lazily enumerate the readable vertices.
    pub fn vertices(&self) -> Result<PartitionVertices<'_, '_, G, S>, GraphError> {
        Ok(PartitionVertices::new(self.base.vertices()?, self))
    }

    /// Remove a vertex.
    ///
    /// # Panics
    /// Panics if `vertex` was produced by a different partition graph.
    pub fn remove_vertex(&self, vertex: &PartitionVertex<'_, G, S>) -> Result<(), GraphError> {
        self.assert_owned(vertex);
        self.base.remove_vertex(vertex.base())?;
        debug!("Removed vertex {}", vertex.id());
        Ok(())
    }

    /// Create an edge in the write partition.
    ///
    /// The endpoints are not required to be in the write partition.
    ///
    /// # Errors
    /// Backend errors are propagated. If tagging fails after the backend
    /// created the edge, the edge is left in place untagged.
    ///
    /// # Panics
    /// Panics if either endpoint was produced by a different partition graph.
    pub fn add_edge(
        &self,
        id: Option<ElementId>,
        out_vertex: &PartitionVertex<'_, G, S>,
        in_vertex: &PartitionVertex<'_, G, S>,
        label: &str,
    ) -> Result<PartitionEdge<'_, G, S>, GraphError> {
        self.assert_owned(out_vertex);
        self.assert_owned(in_vertex);
        let edge = self
            .base
            .add_edge(id, out_vertex.base(), in_vertex.base(), label)?;
        let tag = self.stamp(&edge)?;
        debug!(
            "Added edge {} ({} -{}-> {}) to partition {}",
            edge.id(),
            out_vertex.id(),
            label,
            in_vertex.id(),
            tag
        );
        Ok(PartitionElement::new(self, edge, Some(tag)))
    }

    /// Fetch an edge by id, `None` if absent or not readable.
    pub fn edge(&self, id: &ElementId) -> Result<Option<PartitionEdge<'_, G, S>>, GraphError> {
        Ok(self.base.edge(id)?.and_then(|edge| {
            self.admit(&edge)
                .map(|tag| PartitionElement::new(self, edge, tag))
        }))
    }

    /// Lazily enumerate the readable edges.
    pub fn edges(&self) -> Result<PartitionEdges<'_, '_, G, S>, GraphError> {
        Ok(PartitionEdges::new(self.base.edges()?, self))
    }

    /// Remove an edge.
    ///
    /// # Panics
    /// Panics if `edge` was produced by a different partition graph.
    pub fn remove_edge(&self, edge: &PartitionEdge<'_, G, S>) -> Result<(), GraphError> {
        self.assert_owned(edge);
        self.base.remove_edge(edge.base())?;
        debug!("Removed edge {}", edge.id());
        Ok(())
    }

    /// Remove everything from the backend, in every partition.
    pub fn clear(&self) -> Result<(), GraphError> {
        debug!("Clearing backend through partition view");
        self.base.clear()
    }

    /// Shut the backend down.
    pub fn shutdown(&self) -> Result<(), GraphError> {
        debug!("Shutting down backend through partition view");
        self.base.shutdown()
    }
}

impl<G: Graph> PartitionGraph<G, LocalState> {
    /// Change the partition stamped on new elements.
    ///
    /// Existing elements keep their tags.
    pub fn set_write_partition(&mut self, partition: impl Into<String>) {
        let state = self.state.get_mut();
        state.set_write_partition(partition);
        debug!("Write partition set to {}", state.write_partition());
    }

    /// Make a partition readable. Returns `false` if it already was.
    pub fn add_read_partition(&mut self, partition: impl Into<String>) -> bool {
        let partition = partition.into();
        debug!("Adding read partition {}", partition);
        self.state.get_mut().add_read_partition(partition)
    }

    /// Stop reading a partition. Returns `false` if it was not readable.
    pub fn remove_read_partition(&mut self, partition: &str) -> bool {
        debug!("Removing read partition {}", partition);
        self.state.get_mut().remove_read_partition(partition)
    }

    /// Replace the read partitions.
    pub fn set_read_partitions<I, P>(&mut self, partitions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let state = self.state.get_mut();
        state.set_read_partitions(partitions);
        debug!("Read partitions set to {:?}", state.read_partitions());
    }

    /// Change the property key holding partitions.
    ///
    /// Existing tags under the old key are not migrated.
    pub fn set_partition_key(&mut self, key: impl Into<String>) {
        let state = self.state.get_mut();
        state.set_partition_key(key);
        debug!("Partition key set to {}", state.partition_key());
    }
}

impl<G: Graph> PartitionGraph<G, SharedState> {
    /// Change the partition stamped on new elements.
    ///
    /// Existing elements keep their tags.
    pub fn set_write_partition(&self, partition: impl Into<String>) {
        let partition = partition.into();
        debug!("Write partition set to {}", partition);
        self.state.update(|s| s.set_write_partition(partition));
    }

    /// Make a partition readable. Returns `false` if it already was.
    pub fn add_read_partition(&self, partition: impl Into<String>) -> bool {
        let partition = partition.into();
        debug!("Adding read partition {}", partition);
        self.state.update(|s| s.add_read_partition(partition))
    }

    /// Stop reading a partition. Returns `false` if it was not readable.
    pub fn remove_read_partition(&self, partition: &str) -> bool {
        debug!("Removing read partition {}", partition);
        self.state.update(|s| s.remove_read_partition(partition))
    }

    /// Replace the read partitions.
    pub fn set_read_partitions<I, P>(&self, partitions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.state.update(|s| {
            s.set_read_partitions(partitions);
            debug!("Read partitions set to {:?}", s.read_partitions());
        });
    }

    /// Change the property key holding partitions.
    ///
    /// Existing tags under the old key are not migrated.
    pub fn set_partition_key(&self, key: impl Into<String>) {
        let key = key.into();
        debug!("Partition key set to {}", key);
        self.state.update(|s| s.set_partition_key(key));
    }
}

impl<G: fmt::Display, S> fmt::Display for PartitionGraph<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "partitiongraph[{}]", self.base)
    }
}

impl<G: fmt::Debug, S: StateCell> fmt::Debug for PartitionGraph<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.with_state(|state| {
            f.debug_struct("PartitionGraph")
                .field("base", &self.base)
                .field("state", state)
                .finish()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partigraph_core::{MemoryGraph, MemoryVertex};
    use pretty_assertions::assert_eq;

    fn view(graph: &MemoryGraph) -> PartitionGraph<&MemoryGraph> {
        PartitionGraph::new(graph, "_p", "A", ["A"])
    }

    #[test]
    fn test_add_vertex_stamps_write_partition() {
        let base = MemoryGraph::new();
        let graph = view(&base);

        let v = graph.add_vertex(Some("v1".into())).unwrap();
        assert_eq!(v.partition(), Some("A"));

        let raw = base.vertex(&"v1".into()).unwrap().unwrap();
        assert_eq!(raw.property("_p"), Some(Value::from("A")));
    }

    #[test]
    fn test_vertex_lookup_filters() {
        let base = MemoryGraph::new();
        let raw = base.add_vertex(Some("b".into())).unwrap();
        raw.set_property("_p", "B".into()).unwrap();
        base.add_vertex(Some("free".into())).unwrap();

        let graph = view(&base);
        assert!(graph.vertex(&"b".into()).unwrap().is_none());
        assert!(graph.vertex(&"missing".into()).unwrap().is_none());

        let free = graph.vertex(&"free".into()).unwrap().unwrap();
        assert_eq!(free.partition(), None);
    }

    #[test]
    fn test_is_in_partition_candidates() {
        let base = MemoryGraph::new();
        let graph = view(&base);

        assert!(graph.is_in_partition::<MemoryVertex>(Candidate::Wrapped(None)));
        assert!(graph.is_in_partition::<MemoryVertex>(Candidate::Wrapped(Some(&"A".into()))));
        assert!(!graph.is_in_partition::<MemoryVertex>(Candidate::Wrapped(Some(&"B".into()))));

        let raw = base.add_vertex(None).unwrap();
        assert!(graph.is_in_partition(Candidate::Raw(&raw)));
        raw.set_property("_p", "B".into()).unwrap();
        assert!(!graph.is_in_partition(Candidate::Raw(&raw)));
        raw.set_property("_p", 7i64.into()).unwrap();
        assert!(!graph.is_in_partition(Candidate::Raw(&raw)));
    }

    #[test]
    fn test_setters_local() {
        let base = MemoryGraph::new();
        let mut graph = view(&base);

        graph.set_write_partition("B");
        assert!(graph.add_read_partition("B"));
        assert!(graph.remove_read_partition("A"));
        graph.set_partition_key("_q");

        assert_eq!(graph.write_partition(), "B");
        assert_eq!(graph.read_partitions(), HashSet::from(["B".to_string()]));
        assert_eq!(graph.partition_key(), "_q");

        graph.set_read_partitions(["X", "Y"]);
        assert_eq!(graph.read_partitions().len(), 2);
    }

    #[test]
    fn test_from_settings_defaults_read_to_write() {
        let settings = PartitionSettings::new("_owner", "tenant-a");
        let graph: PartitionGraph<MemoryGraph> =
            PartitionGraph::from_settings(MemoryGraph::new(), &settings).unwrap();

        assert_eq!(graph.partition_key(), "_owner");
        assert_eq!(graph.write_partition(), "tenant-a");
        assert_eq!(
            graph.read_partitions(),
            HashSet::from(["tenant-a".to_string()])
        );
    }

    #[test]
    fn test_from_settings_rejects_empty_key() {
        let settings = PartitionSettings::new("", "tenant-a");
        let result: Result<PartitionGraph<MemoryGraph>, _> =
            PartitionGraph::from_settings(MemoryGraph::new(), &settings);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_settings_rejects_reserved_key() {
        let settings = PartitionSettings::new("id", "tenant-a");
        let result: Result<PartitionGraph<MemoryGraph>, _> =
            PartitionGraph::from_settings(MemoryGraph::new(), &settings);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_display_wraps_base() {
        let base = MemoryGraph::new();
        base.add_vertex(None).unwrap();
        let graph = view(&base);
        assert_eq!(
            graph.to_string(),
            format!("partitiongraph[{}]", base)
        );
    }

    #[test]
    fn test_into_inner_returns_backend() {
        let graph: PartitionGraph<MemoryGraph> =
            PartitionGraph::with_partition(MemoryGraph::new(), "_p", "A");
        graph.add_vertex(None).unwrap();

        let base = graph.into_inner();
        assert_eq!(base.vertex_count(), 1);
    }
}
