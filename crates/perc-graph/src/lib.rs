//! Network topology abstraction for perc simulations.
//!
//! The [`Topology`] trait is the contract the simulator requires from a
//! topology collaborator: a node set, deterministic neighbour lookup, and
//! hop distances. [`AdjacencyGraph`] is the reference backend — a dense
//! undirected adjacency list validated at construction. Topology
//! *generation* (degree distributions, random graph models) lives with the
//! caller; the simulator only reads adjacency.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod error;
pub mod topology;

pub use adjacency::AdjacencyGraph;
pub use error::GraphError;
pub use topology::Topology;
