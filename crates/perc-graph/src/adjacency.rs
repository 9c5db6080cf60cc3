//! Dense undirected adjacency-list backend.

use perc_core::NodeId;
use smallvec::SmallVec;

use crate::error::GraphError;
use crate::topology::Topology;

/// An undirected graph over dense node ids `0..node_count`.
///
/// Built from an edge list; each edge is registered in both directions.
/// Neighbour order is edge insertion order, which callers constructing
/// test scenarios can rely on. Duplicate edges are ignored.
///
/// # Examples
///
/// ```
/// use perc_core::NodeId;
/// use perc_graph::{AdjacencyGraph, Topology};
///
/// let graph = AdjacencyGraph::new(3, &[(0, 1), (1, 2)]).unwrap();
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.neighbours(NodeId(1)).as_slice(), &[NodeId(0), NodeId(2)]);
/// assert_eq!(graph.hop_distance(NodeId(0), NodeId(2)), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyGraph {
    neighbours: Vec<SmallVec<[NodeId; 8]>>,
}

impl AdjacencyGraph {
    /// Build a graph with `node_count` nodes and the given undirected edges.
    ///
    /// Returns an error for an empty node set, an edge endpoint outside
    /// `0..node_count`, or a self-loop.
    pub fn new(node_count: u32, edges: &[(u32, u32)]) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        let mut neighbours = vec![SmallVec::new(); node_count as usize];
        for &(from, to) in edges {
            if from >= node_count || to >= node_count {
                return Err(GraphError::EdgeOutOfRange {
                    from,
                    to,
                    node_count,
                });
            }
            if from == to {
                return Err(GraphError::SelfLoop { node: from });
            }
            let (a, b) = (NodeId(from), NodeId(to));
            if !neighbours[from as usize].contains(&b) {
                neighbours[from as usize].push(b);
                neighbours[to as usize].push(a);
            }
        }
        Ok(Self { neighbours })
    }

    /// The degree of a node; 0 for ids outside the graph.
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbours
            .get(node.0 as usize)
            .map_or(0, SmallVec::len)
    }
}

impl Topology for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.neighbours.len()
    }

    fn nodes(&self) -> Vec<NodeId> {
        (0..self.neighbours.len() as u32).map(NodeId).collect()
    }

    fn contains(&self, node: NodeId) -> bool {
        (node.0 as usize) < self.neighbours.len()
    }

    fn neighbours(&self, node: NodeId) -> SmallVec<[NodeId; 8]> {
        self.neighbours
            .get(node.0 as usize)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_graph() {
        assert_eq!(AdjacencyGraph::new(0, &[]), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn rejects_out_of_range_edges() {
        assert_eq!(
            AdjacencyGraph::new(2, &[(0, 2)]),
            Err(GraphError::EdgeOutOfRange {
                from: 0,
                to: 2,
                node_count: 2
            })
        );
    }

    #[test]
    fn rejects_self_loops() {
        assert_eq!(
            AdjacencyGraph::new(2, &[(1, 1)]),
            Err(GraphError::SelfLoop { node: 1 })
        );
    }

    #[test]
    fn neighbour_order_is_insertion_order() {
        let graph = AdjacencyGraph::new(4, &[(1, 3), (1, 0), (1, 2)]).unwrap();
        assert_eq!(
            graph.neighbours(NodeId(1)).as_slice(),
            &[NodeId(3), NodeId(0), NodeId(2)]
        );
    }

    #[test]
    fn edges_are_undirected() {
        let graph = AdjacencyGraph::new(2, &[(0, 1)]).unwrap();
        assert_eq!(graph.neighbours(NodeId(0)).as_slice(), &[NodeId(1)]);
        assert_eq!(graph.neighbours(NodeId(1)).as_slice(), &[NodeId(0)]);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let graph = AdjacencyGraph::new(2, &[(0, 1), (0, 1), (1, 0)]).unwrap();
        assert_eq!(graph.degree(NodeId(0)), 1);
        assert_eq!(graph.degree(NodeId(1)), 1);
    }

    #[test]
    fn nodes_are_canonical_ascending() {
        let graph = AdjacencyGraph::new(3, &[(2, 0)]).unwrap();
        assert_eq!(graph.nodes(), vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn unknown_node_has_no_neighbours() {
        let graph = AdjacencyGraph::new(2, &[(0, 1)]).unwrap();
        assert!(!graph.contains(NodeId(5)));
        assert!(graph.neighbours(NodeId(5)).is_empty());
    }
}
