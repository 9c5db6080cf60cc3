//! Per-node attached state: queues, capacity, routes, payload.

use std::collections::VecDeque;

use perc_core::{NodeId, Particle, RoutingHistory};

/// Where an admitted particle ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Appended to the active queue.
    Queued,
    /// The queue was at capacity; diverted to the overflow dead-letter log.
    Overflowed,
}

/// The state attached to one network node.
///
/// A fixed record rather than dynamic keyed attributes: the fields below
/// are the complete set, checked at compile time.
///
/// - `queue` holds particles awaiting processing, in arrival order.
/// - `overflow` holds particles that arrived while the queue was full;
///   terminal — the baseline policies never drain it, analysis reads it.
/// - `retired` holds particles that reached their target; terminal.
/// - `routes` is the node's routing-table history, seeded with the
///   self-route at the pre-simulation sentinel.
/// - `payload` is the node's gossip opinion, unset outside gossip mode.
#[derive(Clone, Debug)]
pub struct NodeState<P> {
    capacity: usize,
    queue: VecDeque<Particle<P>>,
    overflow: Vec<Particle<P>>,
    retired: Vec<Particle<P>>,
    routes: RoutingHistory,
    payload: Option<P>,
}

impl<P> NodeState<P> {
    /// Fresh state for `node` with the given queue capacity.
    pub fn new(node: NodeId, capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::new(),
            overflow: Vec::new(),
            retired: Vec::new(),
            routes: RoutingHistory::seeded(node),
            payload: None,
        }
    }

    /// Maximum number of particles the active queue may hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of particles currently queued.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is below capacity.
    pub fn has_room(&self) -> bool {
        self.queue.len() < self.capacity
    }

    /// The particle at the head of the queue, if any.
    pub fn head(&self) -> Option<&Particle<P>> {
        self.queue.front()
    }

    /// Remove and return the head particle.
    pub fn pop_head(&mut self) -> Option<Particle<P>> {
        self.queue.pop_front()
    }

    /// Insert a particle at the head of the queue, bypassing capacity.
    ///
    /// Used by the create-and-send path: a node originating new traffic
    /// is not bound by its own capacity, only the destination's.
    pub fn push_front(&mut self, particle: Particle<P>) {
        self.queue.push_front(particle);
    }

    /// Admit an arriving particle: queue it if there is room, otherwise
    /// divert it to overflow.
    pub fn admit(&mut self, particle: Particle<P>) -> Placement {
        if self.has_room() {
            self.queue.push_back(particle);
            Placement::Queued
        } else {
            self.overflow.push(particle);
            Placement::Overflowed
        }
    }

    /// Take the entire queue, leaving it empty. Gossip's drain step.
    pub fn take_queue(&mut self) -> VecDeque<Particle<P>> {
        std::mem::take(&mut self.queue)
    }

    /// Move a particle into the terminal retired collection.
    pub fn retire(&mut self, particle: Particle<P>) {
        self.retired.push(particle);
    }

    /// The queued particles, head first.
    pub fn queue(&self) -> impl Iterator<Item = &Particle<P>> {
        self.queue.iter()
    }

    /// Particles that overflowed at this node, in arrival order.
    pub fn overflow(&self) -> &[Particle<P>] {
        &self.overflow
    }

    /// Particles retired at this node, in retirement order.
    pub fn retired(&self) -> &[Particle<P>] {
        &self.retired
    }

    /// The routing-table history.
    pub fn routes(&self) -> &RoutingHistory {
        &self.routes
    }

    /// Mutable routing-table history, for the exchange protocol.
    pub fn routes_mut(&mut self) -> &mut RoutingHistory {
        &mut self.routes
    }

    /// The node's gossip payload, if set.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Replace the node's gossip payload.
    pub fn set_payload(&mut self, payload: Option<P>) {
        self.payload = payload;
    }

    /// Take the payload out, leaving `None`.
    pub fn take_payload(&mut self) -> Option<P> {
        self.payload.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perc_core::{ParticleId, Timestep};

    fn particle(id: u64) -> Particle<()> {
        Particle::new(ParticleId(id), NodeId(0), Timestep::ZERO, NodeId(1))
    }

    #[test]
    fn admit_queues_until_capacity_then_overflows() {
        let mut state = NodeState::new(NodeId(0), 2);
        assert_eq!(state.admit(particle(0)), Placement::Queued);
        assert_eq!(state.admit(particle(1)), Placement::Queued);
        assert_eq!(state.admit(particle(2)), Placement::Overflowed);
        assert_eq!(state.queue_len(), 2);
        assert_eq!(state.overflow().len(), 1);
        assert_eq!(state.overflow()[0].id(), ParticleId(2));
    }

    #[test]
    fn queue_is_fifo() {
        let mut state = NodeState::new(NodeId(0), 4);
        state.admit(particle(0));
        state.admit(particle(1));
        assert_eq!(state.head().unwrap().id(), ParticleId(0));
        assert_eq!(state.pop_head().unwrap().id(), ParticleId(0));
        assert_eq!(state.pop_head().unwrap().id(), ParticleId(1));
        assert_eq!(state.pop_head(), None);
    }

    #[test]
    fn push_front_bypasses_capacity() {
        let mut state = NodeState::new(NodeId(0), 1);
        state.admit(particle(0));
        assert!(!state.has_room());
        state.push_front(particle(1));
        assert_eq!(state.queue_len(), 2);
        assert_eq!(state.head().unwrap().id(), ParticleId(1));
    }

    #[test]
    fn take_queue_leaves_it_empty() {
        let mut state = NodeState::new(NodeId(0), 4);
        state.admit(particle(0));
        state.admit(particle(1));
        let drained = state.take_queue();
        assert_eq!(drained.len(), 2);
        assert_eq!(state.queue_len(), 0);
    }

    #[test]
    fn fresh_state_has_seeded_routes() {
        let state: NodeState<()> = NodeState::new(NodeId(3), 1);
        let table = state.routes().latest_before(Timestep::ZERO).unwrap();
        assert!(table.contains_key(&NodeId(3)));
    }

    #[test]
    fn payload_round_trips() {
        let mut state: NodeState<i64> = NodeState::new(NodeId(0), 1);
        assert_eq!(state.payload(), None);
        state.set_payload(Some(5));
        assert_eq!(state.payload(), Some(&5));
        assert_eq!(state.take_payload(), Some(5));
        assert_eq!(state.payload(), None);
    }
}
