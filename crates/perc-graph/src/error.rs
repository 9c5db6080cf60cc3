//! Construction-time validation errors for topology backends.

use std::error::Error;
use std::fmt;

/// Errors rejected by [`AdjacencyGraph::new`](crate::AdjacencyGraph::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The graph has zero nodes.
    EmptyGraph,
    /// An edge endpoint is outside `0..node_count`.
    EdgeOutOfRange {
        /// First endpoint of the offending edge.
        from: u32,
        /// Second endpoint of the offending edge.
        to: u32,
        /// The number of nodes in the graph.
        node_count: u32,
    },
    /// An edge connects a node to itself.
    ///
    /// Self-loops would let the movement primitive "move" a particle onto
    /// its own node, which the double-move guard then misreads.
    SelfLoop {
        /// The node with the self-loop.
        node: u32,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "graph has zero nodes"),
            Self::EdgeOutOfRange {
                from,
                to,
                node_count,
            } => {
                write!(
                    f,
                    "edge ({from}, {to}) references a node outside 0..{node_count}"
                )
            }
            Self::SelfLoop { node } => write!(f, "self-loop on node {node}"),
        }
    }
}

impl Error for GraphError {}
