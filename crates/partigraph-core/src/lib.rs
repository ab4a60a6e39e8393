//! PartiGraph Core - Property graph capability contract
//!
//! This crate provides the minimal interface a storage backend must offer to
//! be decorated by the rest of the workspace:
//! - [`Graph`]: create, fetch, enumerate and remove vertices and edges
//! - [`Element`], [`Vertex`], [`Edge`]: element handles with properties
//! - [`GraphError`]: the single error type of the contract
//!
//! ## Backends
//!
//! - [`MemoryGraph`]: thread-safe in-memory graph on `petgraph::StableGraph`
//!
//! ## Example
//!
//! ```
//! use partigraph_core::{Edge, Element, Graph, MemoryGraph};
//!
//! let graph = MemoryGraph::new();
//! let marko = graph.add_vertex(Some("marko".into())).unwrap();
//! let vadas = graph.add_vertex(Some("vadas".into())).unwrap();
//! marko.set_property("age", 29i64.into()).unwrap();
//!
//! let knows = graph.add_edge(None, &marko, &vadas, "knows").unwrap();
//! assert_eq!(knows.in_vertex().unwrap(), vadas);
//! ```

mod error;
pub mod memory;
mod traits;
mod types;

pub use error::GraphError;
pub use memory::{MemoryEdge, MemoryGraph, MemoryVertex};
pub use traits::{Edge, Element, Graph, Vertex};
pub use types::*;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
