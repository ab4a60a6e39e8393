//! In-memory reference backend.
//!
//! [`MemoryGraph`] stores vertices and edges in a `petgraph::StableGraph`
//! behind a shared lock. Element handles keep a reference to the same store,
//! so properties can be read and written through any handle.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction as PetDirection;
use tracing::{debug, trace};

use crate::error::GraphError;
use crate::traits::{Edge, Element, Graph, Vertex};
use crate::types::{Direction, ElementId, ElementIter, Value};

/// Property key reserved for element ids.
const ID_KEY: &str = "id";

/// Property key reserved for edge labels.
const LABEL_KEY: &str = "label";

#[derive(Debug, Clone)]
struct VertexData {
    id: ElementId,
    properties: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
struct EdgeData {
    id: ElementId,
    label: String,
    properties: HashMap<String, Value>,
}

/// Shared storage behind a [`MemoryGraph`] and all of its handles.
#[derive(Debug, Default)]
struct Store {
    /// The underlying petgraph instance
    graph: StableGraph<VertexData, EdgeData, petgraph::Directed>,

    /// Map from vertex id to NodeIndex for O(1) lookup
    vertex_index: HashMap<ElementId, NodeIndex>,

    /// Map from edge id to EdgeIndex for O(1) lookup
    edge_index: HashMap<ElementId, EdgeIndex>,

    /// Next candidate for a backend-assigned id
    next_id: u64,

    /// Set once `shutdown` has been called
    shut_down: bool,
}

impl Store {
    fn ensure_open(&self) -> Result<(), GraphError> {
        if self.shut_down {
            Err(GraphError::Shutdown)
        } else {
            Ok(())
        }
    }

    /// Allocate the next numeric id not used by either element kind.
    fn allocate_id(&mut self) -> ElementId {
        loop {
            let candidate = ElementId::Int(self.next_id);
            self.next_id += 1;
            if !self.vertex_index.contains_key(&candidate)
                && !self.edge_index.contains_key(&candidate)
            {
                return candidate;
            }
        }
    }

    fn vertex_data(&self, id: &ElementId) -> Option<&VertexData> {
        self.vertex_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    fn vertex_data_mut(&mut self, id: &ElementId) -> Option<&mut VertexData> {
        self.vertex_index
            .get(id)
            .copied()
            .and_then(|idx| self.graph.node_weight_mut(idx))
    }

    fn edge_data(&self, id: &ElementId) -> Option<&EdgeData> {
        self.edge_index
            .get(id)
            .and_then(|&idx| self.graph.edge_weight(idx))
    }

    fn edge_data_mut(&mut self, id: &ElementId) -> Option<&mut EdgeData> {
        self.edge_index
            .get(id)
            .copied()
            .and_then(|idx| self.graph.edge_weight_mut(idx))
    }

    /// Resolve the ids of an edge's endpoints.
    fn endpoint_ids(&self, id: &ElementId) -> Option<(ElementId, ElementId)> {
        let idx = *self.edge_index.get(id)?;
        let (source, target) = self.graph.edge_endpoints(idx)?;
        let source = self.graph.node_weight(source)?.id.clone();
        let target = self.graph.node_weight(target)?.id.clone();
        Some((source, target))
    }
}

fn validate_key(key: &str, is_edge: bool) -> Result<(), GraphError> {
    if key.is_empty() {
        return Err(GraphError::invalid_property(key, "property key cannot be empty"));
    }
    if key == ID_KEY || (is_edge && key == LABEL_KEY) {
        return Err(GraphError::invalid_property(key, "property key is reserved"));
    }
    Ok(())
}

/// A thread-safe in-memory property graph.
///
/// Cloning a `MemoryGraph` yields another handle to the same store.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    store: Arc<RwLock<Store>>,
}

impl MemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.store.read().graph.node_count()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.store.read().graph.edge_count()
    }

    /// Whether `shutdown` has been called on this graph.
    pub fn is_shut_down(&self) -> bool {
        self.store.read().shut_down
    }

    fn vertex_handle(&self, id: ElementId) -> MemoryVertex {
        MemoryVertex {
            store: Arc::clone(&self.store),
            id,
        }
    }

    fn edge_handle(&self, id: ElementId) -> MemoryEdge {
        MemoryEdge {
            store: Arc::clone(&self.store),
            id,
        }
    }

    fn owns(&self, store: &Arc<RwLock<Store>>) -> bool {
        Arc::ptr_eq(&self.store, store)
    }
}

impl fmt::Debug for MemoryGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

impl fmt::Display for MemoryGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "memorygraph[vertices:{} edges:{}]",
            self.vertex_count(),
            self.edge_count()
        )
    }
}

impl Graph for MemoryGraph {
    type Vertex = MemoryVertex;
    type Edge = MemoryEdge;

    fn add_vertex(&self, id: Option<ElementId>) -> Result<MemoryVertex, GraphError> {
        let mut store = self.store.write();
        store.ensure_open()?;

        let id = match id {
            Some(id) if store.vertex_index.contains_key(&id) => {
                return Err(GraphError::duplicate_key(id));
            }
            Some(id) => id,
            None => store.allocate_id(),
        };

        let idx = store.graph.add_node(VertexData {
            id: id.clone(),
            properties: HashMap::new(),
        });
        store.vertex_index.insert(id.clone(), idx);
        trace!("Added vertex {}", id);

        drop(store);
        Ok(self.vertex_handle(id))
    }

    fn vertex(&self, id: &ElementId) -> Result<Option<MemoryVertex>, GraphError> {
        let store = self.store.read();
        store.ensure_open()?;
        let exists = store.vertex_index.contains_key(id);
        drop(store);
        Ok(exists.then(|| self.vertex_handle(id.clone())))
    }

    fn vertices(&self) -> Result<ElementIter<'_, MemoryVertex>, GraphError> {
        let store = self.store.read();
        store.ensure_open()?;
        let ids: Vec<ElementId> = store
            .graph
            .node_weights()
            .map(|data| data.id.clone())
            .collect();
        drop(store);

        // Ids are snapshotted; vertices removed since are skipped.
        Ok(Box::new(ids.into_iter().filter_map(move |id| {
            let present = self.store.read().vertex_index.contains_key(&id);
            present.then(|| self.vertex_handle(id))
        })))
    }

    fn remove_vertex(&self, vertex: &MemoryVertex) -> Result<(), GraphError> {
        if !self.owns(&vertex.store) {
            return Err(GraphError::vertex_not_found(&vertex.id));
        }

        let mut store = self.store.write();
        store.ensure_open()?;
        let idx = store
            .vertex_index
            .remove(&vertex.id)
            .ok_or_else(|| GraphError::vertex_not_found(&vertex.id))?;

        // petgraph drops incident edges with the node; forget their ids first
        let incident: Vec<ElementId> = store
            .graph
            .edges_directed(idx, PetDirection::Outgoing)
            .chain(store.graph.edges_directed(idx, PetDirection::Incoming))
            .map(|edge_ref| edge_ref.weight().id.clone())
            .collect();
        for edge_id in &incident {
            store.edge_index.remove(edge_id);
        }
        store.graph.remove_node(idx);

        debug!(
            "Removed vertex {} with {} incident edges",
            vertex.id,
            incident.len()
        );
        Ok(())
    }

    fn add_edge(
        &self,
        id: Option<ElementId>,
        out_vertex: &MemoryVertex,
        in_vertex: &MemoryVertex,
        label: &str,
    ) -> Result<MemoryEdge, GraphError> {
        for endpoint in [out_vertex, in_vertex] {
            if !self.owns(&endpoint.store) {
                return Err(GraphError::vertex_not_found(&endpoint.id));
            }
        }

        let mut store = self.store.write();
        store.ensure_open()?;

        let source = *store
            .vertex_index
            .get(&out_vertex.id)
            .ok_or_else(|| GraphError::vertex_not_found(&out_vertex.id))?;
        let target = *store
            .vertex_index
            .get(&in_vertex.id)
            .ok_or_else(|| GraphError::vertex_not_found(&in_vertex.id))?;

        let id = match id {
            Some(id) if store.edge_index.contains_key(&id) => {
                return Err(GraphError::duplicate_key(id));
            }
            Some(id) => id,
            None => store.allocate_id(),
        };

        let idx = store.graph.add_edge(
            source,
            target,
            EdgeData {
                id: id.clone(),
                label: label.to_string(),
                properties: HashMap::new(),
            },
        );
        store.edge_index.insert(id.clone(), idx);
        trace!(
            "Added edge {} ({} -{}-> {})",
            id,
            out_vertex.id,
            label,
            in_vertex.id
        );

        drop(store);
        Ok(self.edge_handle(id))
    }

    fn edge(&self, id: &ElementId) -> Result<Option<MemoryEdge>, GraphError> {
        let store = self.store.read();
        store.ensure_open()?;
        let exists = store.edge_index.contains_key(id);
        drop(store);
        Ok(exists.then(|| self.edge_handle(id.clone())))
    }

    fn edges(&self) -> Result<ElementIter<'_, MemoryEdge>, GraphError> {
        let store = self.store.read();
        store.ensure_open()?;
        let ids: Vec<ElementId> = store
            .graph
            .edge_references()
            .map(|edge_ref| edge_ref.weight().id.clone())
            .collect();
        drop(store);

        Ok(Box::new(ids.into_iter().filter_map(move |id| {
            let present = self.store.read().edge_index.contains_key(&id);
            present.then(|| self.edge_handle(id))
        })))
    }

    fn remove_edge(&self, edge: &MemoryEdge) -> Result<(), GraphError> {
        if !self.owns(&edge.store) {
            return Err(GraphError::edge_not_found(&edge.id));
        }

        let mut store = self.store.write();
        store.ensure_open()?;
        let idx = store
            .edge_index
            .remove(&edge.id)
            .ok_or_else(|| GraphError::edge_not_found(&edge.id))?;
        store.graph.remove_edge(idx);
        trace!("Removed edge {}", edge.id);
        Ok(())
    }

    fn clear(&self) -> Result<(), GraphError> {
        let mut store = self.store.write();
        store.ensure_open()?;
        store.graph.clear();
        store.vertex_index.clear();
        store.edge_index.clear();
        debug!("Cleared memory graph");
        Ok(())
    }

    fn shutdown(&self) -> Result<(), GraphError> {
        let mut store = self.store.write();
        store.shut_down = true;
        debug!("Memory graph shut down");
        Ok(())
    }
}

/// Vertex handle into a [`MemoryGraph`].
#[derive(Clone)]
pub struct MemoryVertex {
    store: Arc<RwLock<Store>>,
    id: ElementId,
}

impl PartialEq for MemoryVertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Eq for MemoryVertex {}

impl Hash for MemoryVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MemoryVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemoryVertex").field(&self.id).finish()
    }
}

impl fmt::Display for MemoryVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v[{}]", self.id)
    }
}

impl Element for MemoryVertex {
    fn id(&self) -> ElementId {
        self.id.clone()
    }

    fn property(&self, key: &str) -> Option<Value> {
        let store = self.store.read();
        store
            .vertex_data(&self.id)
            .and_then(|data| data.properties.get(key).cloned())
    }

    fn property_keys(&self) -> Vec<String> {
        let store = self.store.read();
        store
            .vertex_data(&self.id)
            .map(|data| data.properties.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn set_property(&self, key: &str, value: Value) -> Result<(), GraphError> {
        validate_key(key, false)?;
        let mut store = self.store.write();
        store.ensure_open()?;
        let data = store
            .vertex_data_mut(&self.id)
            .ok_or_else(|| GraphError::vertex_not_found(&self.id))?;
        data.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_property(&self, key: &str) -> Result<Option<Value>, GraphError> {
        let mut store = self.store.write();
        store.ensure_open()?;
        let data = store
            .vertex_data_mut(&self.id)
            .ok_or_else(|| GraphError::vertex_not_found(&self.id))?;
        Ok(data.properties.remove(key))
    }
}

impl Vertex for MemoryVertex {
    type Edge = MemoryEdge;

    fn edges(
        &self,
        direction: Direction,
        labels: &[&str],
    ) -> Result<ElementIter<'_, MemoryEdge>, GraphError> {
        let store = self.store.read();
        store.ensure_open()?;
        let idx = *store
            .vertex_index
            .get(&self.id)
            .ok_or_else(|| GraphError::vertex_not_found(&self.id))?;

        let matches_label =
            |data: &EdgeData| labels.is_empty() || labels.iter().any(|l| *l == data.label);

        let mut ids = Vec::new();
        if matches!(direction, Direction::Out | Direction::Both) {
            ids.extend(
                store
                    .graph
                    .edges_directed(idx, PetDirection::Outgoing)
                    .filter(|edge_ref| matches_label(edge_ref.weight()))
                    .map(|edge_ref| edge_ref.weight().id.clone()),
            );
        }
        if matches!(direction, Direction::In | Direction::Both) {
            ids.extend(
                store
                    .graph
                    .edges_directed(idx, PetDirection::Incoming)
                    // Self-loops were already collected as outgoing edges
                    .filter(|edge_ref| {
                        direction == Direction::In || edge_ref.source() != edge_ref.target()
                    })
                    .filter(|edge_ref| matches_label(edge_ref.weight()))
                    .map(|edge_ref| edge_ref.weight().id.clone()),
            );
        }
        drop(store);

        let store = Arc::clone(&self.store);
        Ok(Box::new(ids.into_iter().filter_map(move |id| {
            let present = store.read().edge_index.contains_key(&id);
            present.then(|| MemoryEdge {
                store: Arc::clone(&store),
                id,
            })
        })))
    }
}

/// Edge handle into a [`MemoryGraph`].
#[derive(Clone)]
pub struct MemoryEdge {
    store: Arc<RwLock<Store>>,
    id: ElementId,
}

impl MemoryEdge {
    fn endpoint(&self, direction: Direction) -> Result<MemoryVertex, GraphError> {
        let store = self.store.read();
        store.ensure_open()?;
        let (source, target) = store
            .endpoint_ids(&self.id)
            .ok_or_else(|| GraphError::edge_not_found(&self.id))?;
        let id = match direction {
            Direction::In => target,
            Direction::Out | Direction::Both => source,
        };
        Ok(MemoryVertex {
            store: Arc::clone(&self.store),
            id,
        })
    }
}

impl PartialEq for MemoryEdge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Eq for MemoryEdge {}

impl Hash for MemoryEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MemoryEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemoryEdge").field(&self.id).finish()
    }
}

impl fmt::Display for MemoryEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.read();
        match (store.endpoint_ids(&self.id), store.edge_data(&self.id)) {
            (Some((source, target)), Some(data)) => {
                write!(f, "e[{}][{}-{}->{}]", self.id, source, data.label, target)
            }
            _ => write!(f, "e[{}]", self.id),
        }
    }
}

impl Element for MemoryEdge {
    fn id(&self) -> ElementId {
        self.id.clone()
    }

    fn property(&self, key: &str) -> Option<Value> {
        let store = self.store.read();
        store
            .edge_data(&self.id)
            .and_then(|data| data.properties.get(key).cloned())
    }

    fn property_keys(&self) -> Vec<String> {
        let store = self.store.read();
        store
            .edge_data(&self.id)
            .map(|data| data.properties.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn set_property(&self, key: &str, value: Value) -> Result<(), GraphError> {
        validate_key(key, true)?;
        let mut store = self.store.write();
        store.ensure_open()?;
        let data = store
            .edge_data_mut(&self.id)
            .ok_or_else(|| GraphError::edge_not_found(&self.id))?;
        data.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_property(&self, key: &str) -> Result<Option<Value>, GraphError> {
        let mut store = self.store.write();
        store.ensure_open()?;
        let data = store
            .edge_data_mut(&self.id)
            .ok_or_else(|| GraphError::edge_not_found(&self.id))?;
        Ok(data.properties.remove(key))
    }
}

impl Edge for MemoryEdge {
    type Vertex = MemoryVertex;

    fn label(&self) -> String {
        let store = self.store.read();
        store
            .edge_data(&self.id)
            .map(|data| data.label.clone())
            .unwrap_or_default()
    }

    fn out_vertex(&self) -> Result<MemoryVertex, GraphError> {
        self.endpoint(Direction::Out)
    }

    fn in_vertex(&self) -> Result<MemoryVertex, GraphError> {
        self.endpoint(Direction::In)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted_ids<E: Element>(elements: impl Iterator<Item = E>) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = elements.map(|e| e.id()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_add_vertex_assigns_ids() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        let b = graph.add_vertex(None).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_auto_id_skips_taken_ids() {
        let graph = MemoryGraph::new();
        graph.add_vertex(Some(0u64.into())).unwrap();
        let v = graph.add_vertex(None).unwrap();
        assert_eq!(v.id(), ElementId::Int(1));
    }

    #[test]
    fn test_duplicate_vertex_id() {
        let graph = MemoryGraph::new();
        graph.add_vertex(Some("alice".into())).unwrap();
        let err = graph.add_vertex(Some("alice".into())).unwrap_err();
        assert_eq!(err, GraphError::duplicate_key("alice"));
    }

    #[test]
    fn test_vertex_lookup() {
        let graph = MemoryGraph::new();
        let v = graph.add_vertex(Some(1u64.into())).unwrap();

        assert_eq!(graph.vertex(&1u64.into()).unwrap(), Some(v));
        assert_eq!(graph.vertex(&2u64.into()).unwrap(), None);
    }

    #[test]
    fn test_properties() {
        let graph = MemoryGraph::new();
        let v = graph.add_vertex(None).unwrap();
        v.set_property("name", "marko".into()).unwrap();
        v.set_property("age", 29i64.into()).unwrap();

        assert_eq!(v.property("name"), Some(Value::from("marko")));
        let mut keys = v.property_keys();
        keys.sort();
        assert_eq!(keys, vec!["age".to_string(), "name".to_string()]);

        assert_eq!(v.remove_property("age").unwrap(), Some(Value::Int(29)));
        assert_eq!(v.property("age"), None);
    }

    #[test]
    fn test_reserved_property_keys() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        let b = graph.add_vertex(None).unwrap();
        let e = graph.add_edge(None, &a, &b, "knows").unwrap();

        assert!(a.set_property("id", "x".into()).is_err());
        assert!(a.set_property("", "x".into()).is_err());
        assert!(a.set_property("label", "x".into()).is_ok());
        assert!(e.set_property("label", "x".into()).is_err());
    }

    #[test]
    fn test_edges_and_endpoints() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(Some("a".into())).unwrap();
        let b = graph.add_vertex(Some("b".into())).unwrap();
        let e = graph.add_edge(Some("ab".into()), &a, &b, "knows").unwrap();

        assert_eq!(e.label(), "knows");
        assert_eq!(e.out_vertex().unwrap(), a);
        assert_eq!(e.in_vertex().unwrap(), b);
        assert_eq!(e.to_string(), "e[ab][a-knows->b]");

        let out: Vec<MemoryEdge> = a.edges(Direction::Out, &[]).unwrap().collect();
        assert_eq!(out, vec![e.clone()]);
        assert_eq!(a.edges(Direction::In, &[]).unwrap().count(), 0);
        assert_eq!(b.edges(Direction::In, &["knows"]).unwrap().count(), 1);
        assert_eq!(b.edges(Direction::In, &["created"]).unwrap().count(), 0);
    }

    #[test]
    fn test_self_loop_listed_once_for_both() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        graph.add_edge(None, &a, &a, "self").unwrap();

        assert_eq!(a.edges(Direction::Both, &[]).unwrap().count(), 1);
        assert_eq!(a.edges(Direction::In, &[]).unwrap().count(), 1);
        assert_eq!(a.edges(Direction::Out, &[]).unwrap().count(), 1);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        let b = graph.add_vertex(None).unwrap();
        let e = graph.add_edge(None, &a, &b, "knows").unwrap();

        graph.remove_vertex(&a).unwrap();

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edge(&e.id()).unwrap(), None);
        assert!(graph.remove_vertex(&a).unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_edge_to_removed_vertex() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        let b = graph.add_vertex(None).unwrap();
        graph.remove_vertex(&b).unwrap();

        let err = graph.add_edge(None, &a, &b, "knows").unwrap_err();
        assert_eq!(err, GraphError::vertex_not_found(b.id()));
    }

    #[test]
    fn test_handles_from_other_graph_rejected() {
        let graph = MemoryGraph::new();
        let other = MemoryGraph::new();
        let a = graph.add_vertex(Some(1u64.into())).unwrap();
        let foreign = other.add_vertex(Some(1u64.into())).unwrap();

        assert_ne!(a, foreign);
        assert!(graph.add_edge(None, &a, &foreign, "x").is_err());
        assert!(graph.remove_vertex(&foreign).is_err());
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_enumeration_skips_removed() {
        let graph = MemoryGraph::new();
        for i in 0..4u64 {
            graph.add_vertex(Some(i.into())).unwrap();
        }

        let mut iter = graph.vertices().unwrap();
        let first = iter.next().unwrap();
        for i in 0..4u64 {
            let id = ElementId::from(i);
            if id != first.id() && i % 2 == 0 {
                let v = graph.vertex(&id).unwrap().unwrap();
                graph.remove_vertex(&v).unwrap();
            }
        }
        let rest = iter.count();
        assert!(rest <= 2);
    }

    #[test]
    fn test_iteration() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(Some(1u64.into())).unwrap();
        let b = graph.add_vertex(Some(2u64.into())).unwrap();
        graph.add_edge(Some(10u64.into()), &a, &b, "x").unwrap();
        graph.add_edge(Some(11u64.into()), &b, &a, "y").unwrap();

        assert_eq!(
            sorted_ids(graph.vertices().unwrap()),
            vec![ElementId::Int(1), ElementId::Int(2)]
        );
        assert_eq!(
            sorted_ids(graph.edges().unwrap()),
            vec![ElementId::Int(10), ElementId::Int(11)]
        );
    }

    #[test]
    fn test_clear() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        graph.add_edge(None, &a, &a, "self").unwrap();
        graph.clear().unwrap();

        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(a.property_keys(), Vec::<String>::new());
    }

    #[test]
    fn test_shutdown() {
        let graph = MemoryGraph::new();
        let a = graph.add_vertex(None).unwrap();
        graph.shutdown().unwrap();

        assert!(graph.is_shut_down());
        assert_eq!(graph.add_vertex(None).unwrap_err(), GraphError::Shutdown);
        assert_eq!(graph.vertices().err(), Some(GraphError::Shutdown));
        assert_eq!(
            a.set_property("k", "v".into()).unwrap_err(),
            GraphError::Shutdown
        );
    }

    #[test]
    fn test_display() {
        let graph = MemoryGraph::new();
        let v = graph.add_vertex(Some("x".into())).unwrap();
        assert_eq!(graph.to_string(), "memorygraph[vertices:1 edges:0]");
        assert_eq!(v.to_string(), "v[x]");
    }
}
