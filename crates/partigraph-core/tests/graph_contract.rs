//! Contract tests for graph backends.
//!
//! Each check is written against the `Graph` trait only, so any backend can
//! be plugged in. The in-memory backend is exercised here.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package partigraph-core --test graph_contract
//! ```

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use partigraph_core::{
    Direction, Edge, Element, ElementId, Graph, GraphError, MemoryGraph, Value, Vertex,
};

// ============================================================================
// Generic Checks
// ============================================================================

fn check_vertex_lifecycle<G: Graph>(graph: &G) {
    let v = graph.add_vertex(Some("v1".into())).expect("add vertex");
    assert_eq!(v.id(), ElementId::from("v1"));

    let fetched = graph.vertex(&"v1".into()).expect("fetch").expect("present");
    assert_eq!(fetched, v);

    graph.remove_vertex(&v).expect("remove");
    assert!(graph.vertex(&"v1".into()).expect("fetch").is_none());
}

fn check_duplicate_ids<G: Graph>(graph: &G) {
    graph.add_vertex(Some(5u64.into())).expect("first add");
    let err = graph.add_vertex(Some(5u64.into())).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateKey { .. }));
}

fn check_property_round_trip<G: Graph>(graph: &G) {
    let v = graph.add_vertex(None).expect("add vertex");
    v.set_property("name", Value::from("lop")).expect("set");
    v.set_property("weights", Value::from(vec![0.4, 1.0])).expect("set");

    // A second handle observes the same properties
    let again = graph.vertex(&v.id()).expect("fetch").expect("present");
    assert_eq!(again.property("name"), Some(Value::from("lop")));
    assert_eq!(
        again.property("weights"),
        Some(Value::List(vec![Value::Float(0.4), Value::Float(1.0)]))
    );
}

fn check_edge_traversal<G: Graph>(graph: &G) {
    let marko = graph.add_vertex(Some("marko".into())).expect("add");
    let vadas = graph.add_vertex(Some("vadas".into())).expect("add");
    let lop = graph.add_vertex(Some("lop".into())).expect("add");

    let knows = graph
        .add_edge(Some("7".into()), &marko, &vadas, "knows")
        .expect("add edge");
    let created = graph
        .add_edge(Some("9".into()), &marko, &lop, "created")
        .expect("add edge");

    let out: HashSet<ElementId> = marko
        .edges(Direction::Out, &[])
        .expect("edges")
        .map(|e| e.id())
        .collect();
    assert_eq!(out, HashSet::from([knows.id(), created.id()]));

    let only_knows: Vec<G::Edge> = marko
        .edges(Direction::Out, &["knows"])
        .expect("edges")
        .collect();
    assert_eq!(only_knows, vec![knows.clone()]);

    assert_eq!(knows.out_vertex().expect("out"), marko);
    assert_eq!(knows.in_vertex().expect("in"), vadas);
    assert_eq!(created.label(), "created");

    let all_edges: HashSet<ElementId> = graph.edges().expect("edges").map(|e| e.id()).collect();
    assert_eq!(all_edges.len(), 2);
}

fn check_clear<G: Graph>(graph: &G) {
    let a = graph.add_vertex(None).expect("add");
    let b = graph.add_vertex(None).expect("add");
    graph.add_edge(None, &a, &b, "x").expect("add edge");

    graph.clear().expect("clear");
    assert_eq!(graph.vertices().expect("vertices").count(), 0);
    assert_eq!(graph.edges().expect("edges").count(), 0);
}

// ============================================================================
// MemoryGraph
// ============================================================================

#[test]
fn memory_vertex_lifecycle() {
    check_vertex_lifecycle(&MemoryGraph::new());
}

#[test]
fn memory_duplicate_ids() {
    check_duplicate_ids(&MemoryGraph::new());
}

#[test]
fn memory_property_round_trip() {
    check_property_round_trip(&MemoryGraph::new());
}

#[test]
fn memory_edge_traversal() {
    check_edge_traversal(&MemoryGraph::new());
}

#[test]
fn memory_clear() {
    check_clear(&MemoryGraph::new());
}

#[test]
fn memory_graph_shared_across_threads() {
    let graph = MemoryGraph::new();

    std::thread::scope(|scope| {
        for worker in 0..4u64 {
            let graph = graph.clone();
            scope.spawn(move || {
                for i in 0..25u64 {
                    graph
                        .add_vertex(Some((worker * 100 + i).into()))
                        .expect("add vertex");
                }
            });
        }
    });

    assert_eq!(graph.vertex_count(), 100);
}
