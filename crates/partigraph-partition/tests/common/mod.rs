//! Common fixtures for partition view integration tests.
//!
//! Builds a small shared graph directly through the backend, so that tests
//! can check what each view does and does not see.

#![allow(dead_code)]

use partigraph_core::{Element, ElementId, Graph, MemoryGraph};

/// Partition key used by every fixture.
pub const KEY: &str = "_p";

/// A backend holding two tenants and one untagged vertex.
///
/// ```text
/// a1 (A) --knows(A)--> a2 (A) --owns(B)--> b1 (B)
/// b1 (B) --knows(B)--> free (untagged)
/// a1 (A) --likes(untagged)--> free
/// ```
pub fn tenant_graph() -> MemoryGraph {
    let graph = MemoryGraph::new();

    let a1 = tagged_vertex(&graph, "a1", Some("A"));
    let a2 = tagged_vertex(&graph, "a2", Some("A"));
    let b1 = tagged_vertex(&graph, "b1", Some("B"));
    let free = tagged_vertex(&graph, "free", None);

    tagged_edge(&graph, "a1-knows-a2", &a1, &a2, "knows", Some("A"));
    tagged_edge(&graph, "a2-owns-b1", &a2, &b1, "owns", Some("B"));
    tagged_edge(&graph, "b1-knows-free", &b1, &free, "knows", Some("B"));
    tagged_edge(&graph, "a1-likes-free", &a1, &free, "likes", None);

    graph
}

pub fn tagged_vertex(
    graph: &MemoryGraph,
    id: &str,
    partition: Option<&str>,
) -> <MemoryGraph as Graph>::Vertex {
    let vertex = graph.add_vertex(Some(id.into())).unwrap();
    if let Some(partition) = partition {
        vertex.set_property(KEY, partition.into()).unwrap();
    }
    vertex
}

pub fn tagged_edge(
    graph: &MemoryGraph,
    id: &str,
    out_vertex: &<MemoryGraph as Graph>::Vertex,
    in_vertex: &<MemoryGraph as Graph>::Vertex,
    label: &str,
    partition: Option<&str>,
) -> <MemoryGraph as Graph>::Edge {
    let edge = graph
        .add_edge(Some(id.into()), out_vertex, in_vertex, label)
        .unwrap();
    if let Some(partition) = partition {
        edge.set_property(KEY, partition.into()).unwrap();
    }
    edge
}

/// Sorted string ids of a sequence of elements.
pub fn sorted_ids<I, T>(elements: I, id: impl Fn(&T) -> ElementId) -> Vec<String>
where
    I: IntoIterator<Item = T>,
{
    let mut ids: Vec<String> = elements.into_iter().map(|e| id(&e).to_string()).collect();
    ids.sort();
    ids
}
