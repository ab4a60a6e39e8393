//! PartiGraph Partition - Partition-scoped views over a shared graph
//!
//! Several logical tenants can share one physical graph: each view stamps the
//! elements it creates with its write partition and only returns elements
//! whose partition is one of its read partitions. Elements without a
//! partition are visible to every view.
//!
//! - [`PartitionGraph`]: the view, wrapping any [`partigraph_core::Graph`]
//! - [`PartitionVertex`], [`PartitionEdge`]: element wrappers it hands out
//! - [`PartitionVertices`], [`PartitionEdges`]: lazy filtering sequences
//! - [`SharedPartitionGraph`]: a view that can be reconfigured while shared
//!
//! ## Example
//!
//! ```
//! use partigraph_core::MemoryGraph;
//! use partigraph_partition::PartitionGraph;
//!
//! let base = MemoryGraph::new();
//! let mut graph = PartitionGraph::<_>::with_partition(&base, "_partition", "a");
//! graph.add_vertex(Some("x".into())).unwrap();
//!
//! graph.set_write_partition("b");
//! graph.add_vertex(Some("y".into())).unwrap();
//!
//! // Still reading only "a"
//! assert_eq!(graph.vertices().unwrap().count(), 1);
//!
//! graph.add_read_partition("b");
//! assert_eq!(graph.vertices().unwrap().count(), 2);
//! ```

mod element;
mod graph;
mod sequence;
mod state;

pub use element::{PartitionEdge, PartitionElement, PartitionVertex};
pub use graph::{Candidate, PartitionGraph, SharedPartitionGraph};
pub use sequence::{PartitionEdges, PartitionVertices};
pub use state::{LocalState, PartitionState, SharedState, StateCell};
