//! The core [`Topology`] trait.

use std::collections::{HashMap, VecDeque};

use perc_core::NodeId;
use smallvec::SmallVec;

/// The topology contract the simulator consumes.
///
/// Backends define the node set and adjacency; the simulator attaches
/// per-node state elsewhere and only reads the structure. All methods must
/// be deterministic: two calls on the same instance return the same
/// sequences, which the driver relies on for reproducible runs.
pub trait Topology: Send + Sync + 'static {
    /// Total number of nodes.
    fn node_count(&self) -> usize;

    /// All nodes in canonical ascending order.
    fn nodes(&self) -> Vec<NodeId>;

    /// Whether `node` belongs to this topology.
    fn contains(&self, node: NodeId) -> bool;

    /// The neighbours of a node, in a deterministic backend-defined order.
    ///
    /// The simulator assumes no ordering beyond determinism; the greedy
    /// policies scan this sequence front to back. The `SmallVec<[NodeId; 8]>`
    /// keeps low-degree lookups off the heap.
    fn neighbours(&self, node: NodeId) -> SmallVec<[NodeId; 8]>;

    /// Shortest-path hop count between two nodes, `None` if unreachable.
    ///
    /// Default implementation is a breadth-first search over
    /// [`neighbours`](Self::neighbours). Backends with structure to exploit
    /// may override.
    fn hop_distance(&self, from: NodeId, to: NodeId) -> Option<u32> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }
        let mut distance: HashMap<NodeId, u32> = HashMap::new();
        distance.insert(from, 0);
        let mut frontier = VecDeque::new();
        frontier.push_back(from);
        while let Some(node) = frontier.pop_front() {
            let next = distance[&node] + 1;
            for neighbour in self.neighbours(node) {
                if neighbour == to {
                    return Some(next);
                }
                distance.entry(neighbour).or_insert_with(|| {
                    frontier.push_back(neighbour);
                    next
                });
            }
        }
        None
    }
}
