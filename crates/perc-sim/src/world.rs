//! The simulation world: topology plus per-node state.

use indexmap::IndexMap;

use perc_core::{NodeId, Particle, ParticleSource, Timestep};
use perc_graph::Topology;

use crate::state::NodeState;

/// A topology with per-node state attached and an owned particle id
/// sequence.
///
/// The topology is read-only for the lifetime of the world; all mutation
/// goes through the node states. Node states are stored in canonical node
/// order, so iteration is deterministic.
pub struct World<P> {
    topology: Box<dyn Topology>,
    nodes: IndexMap<NodeId, NodeState<P>>,
    source: ParticleSource,
}

impl<P> World<P> {
    /// Attach fresh node states with the given queue capacity to every
    /// node of `topology`.
    ///
    /// Capacity is fixed for the simulation's duration. Each node's
    /// routing history starts seeded with its self-route.
    pub fn new(topology: Box<dyn Topology>, capacity: usize) -> Self {
        let nodes = topology
            .nodes()
            .into_iter()
            .map(|node| (node, NodeState::new(node, capacity)))
            .collect();
        Self {
            topology,
            nodes,
            source: ParticleSource::new(),
        }
    }

    /// The underlying topology.
    pub fn topology(&self) -> &dyn Topology {
        self.topology.as_ref()
    }

    /// Number of nodes with attached state.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The state attached to `node`, if it exists.
    pub fn state(&self, node: NodeId) -> Option<&NodeState<P>> {
        self.nodes.get(&node)
    }

    /// Mutable state attached to `node`, if it exists.
    pub fn state_mut(&mut self, node: NodeId) -> Option<&mut NodeState<P>> {
        self.nodes.get_mut(&node)
    }

    /// Iterate node states in canonical node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeState<P>)> {
        self.nodes.iter().map(|(node, state)| (*node, state))
    }

    /// Allocate a fresh particle from the world's id sequence.
    ///
    /// The particle is returned, not inserted; callers place it in a
    /// queue themselves.
    pub fn mint(&mut self, start: NodeId, start_timestep: Timestep, target: NodeId) -> Particle<P> {
        Particle::new(self.source.allocate(), start, start_timestep, target)
    }

    /// Every particle in the world, across all nodes' queue, overflow,
    /// and retired collections.
    ///
    /// The analysis surface: collaborators read this after a run to
    /// compute delivery statistics. Iteration order is canonical node
    /// order, then queue before overflow before retired within a node.
    pub fn particles(&self) -> impl Iterator<Item = &Particle<P>> {
        self.nodes.values().flat_map(|state| {
            state
                .queue()
                .chain(state.overflow().iter())
                .chain(state.retired().iter())
        })
    }
}

impl<P> std::fmt::Debug for World<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("node_count", &self.nodes.len())
            .field("particles", &self.particles().count())
            .finish()
    }
}
