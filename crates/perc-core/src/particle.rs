//! The particle record: an identity-bearing unit of data in transit.

use crate::id::{NodeId, ParticleId, Timestep};

/// One entry of a particle's travel history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
    /// The node the particle arrived at.
    pub node: NodeId,
    /// The timestep the arrival happened in.
    pub timestep: Timestep,
}

/// A particle tracked through a simulation.
///
/// Origin metadata (`id`, `start`, `start_timestep`, `target`) is fixed at
/// construction. The `path` is append-only and records every hop the
/// particle makes; the particle itself physically resides in exactly one
/// node's queue, overflow, or retired collection at any instant — ownership
/// of the `Particle` value enforces that there is no second copy.
///
/// `P` is the application payload carried in gossip mode; movement-only
/// simulations use `Particle<()>` and leave it unset.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<P> {
    id: ParticleId,
    start: NodeId,
    start_timestep: Timestep,
    target: NodeId,
    path: Vec<Hop>,
    payload: Option<P>,
}

impl<P> Particle<P> {
    /// Construct a particle with an empty path and no payload.
    pub fn new(id: ParticleId, start: NodeId, start_timestep: Timestep, target: NodeId) -> Self {
        Self {
            id,
            start,
            start_timestep,
            target,
            path: Vec::new(),
            payload: None,
        }
    }

    /// Construct a particle carrying a payload from the outset.
    pub fn with_payload(
        id: ParticleId,
        start: NodeId,
        start_timestep: Timestep,
        target: NodeId,
        payload: P,
    ) -> Self {
        Self {
            payload: Some(payload),
            ..Self::new(id, start, start_timestep, target)
        }
    }

    /// The particle's unique id.
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// The node the particle was created at.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The timestep the particle was created in.
    pub fn start_timestep(&self) -> Timestep {
        self.start_timestep
    }

    /// The node the particle is trying to reach.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Every hop recorded so far, oldest first.
    pub fn path(&self) -> &[Hop] {
        &self.path
    }

    /// The most recent hop, if the particle has moved at all.
    pub fn last_hop(&self) -> Option<Hop> {
        self.path.last().copied()
    }

    /// Whether the particle already moved in `timestep`.
    ///
    /// This is the double-move guard: the movement primitive refuses to
    /// move a particle whose last recorded hop is at the current timestep.
    pub fn moved_at(&self, timestep: Timestep) -> bool {
        self.last_hop().is_some_and(|hop| hop.timestep == timestep)
    }

    /// Append a hop to the travel history.
    pub fn record_hop(&mut self, node: NodeId, timestep: Timestep) {
        self.path.push(Hop { node, timestep });
    }

    /// The carried payload, if any.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Replace the carried payload.
    pub fn set_payload(&mut self, payload: Option<P>) {
        self.payload = payload;
    }

    /// Take the payload out, leaving `None`.
    pub fn take_payload(&mut self) -> Option<P> {
        self.payload.take()
    }

    /// Consume the particle, yielding its payload.
    pub fn into_payload(self) -> Option<P> {
        self.payload
    }
}
