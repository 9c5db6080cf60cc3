//! The movement primitive: the sole mutator that carries a particle
//! across an edge.

use perc_core::{NodeId, Timestep, TransitError};

use crate::state::Placement;
use crate::world::World;

/// Move the head particle of `from`'s queue to `to`.
///
/// The caller (a dynamics policy) is responsible for `to` being a
/// neighbour of `from`; adjacency is not re-validated here. The primitive
/// enforces the two invariants that are its own:
///
/// - a particle moves at most once per timestep — if the head's last
///   recorded hop is at `timestep`, the call fails with
///   [`TransitError::DoubleMove`], which is fatal to the run;
/// - the destination queue never exceeds its capacity — a particle that
///   would push it over is diverted to the overflow dead-letter log.
///
/// On success the particle's path has grown by exactly one hop and the
/// returned [`Placement`] says where it landed.
pub fn move_particle<P>(
    world: &mut World<P>,
    from: NodeId,
    to: NodeId,
    timestep: Timestep,
) -> Result<Placement, TransitError> {
    if world.state(to).is_none() {
        return Err(TransitError::UnknownNode { node: to });
    }
    let from_state = world
        .state_mut(from)
        .ok_or(TransitError::UnknownNode { node: from })?;
    {
        let head = from_state
            .head()
            .ok_or(TransitError::EmptyQueue { node: from })?;
        if head.moved_at(timestep) {
            return Err(TransitError::DoubleMove {
                particle: head.id(),
                timestep,
            });
        }
    }
    let mut particle = from_state
        .pop_head()
        .ok_or(TransitError::EmptyQueue { node: from })?;
    particle.record_hop(to, timestep);

    let to_state = world
        .state_mut(to)
        .ok_or(TransitError::UnknownNode { node: to })?;
    Ok(to_state.admit(particle))
}

/// Create a particle at `start` and immediately send it toward `to`.
///
/// The new particle targets `to` and carries `payload`. It is inserted at
/// the head of `start`'s queue bypassing the origin's capacity — only the
/// destination's capacity matters — and then moved with [`move_particle`].
/// Gossip fan-out originates all its traffic through this path.
pub fn send_new_particle<P>(
    world: &mut World<P>,
    start: NodeId,
    to: NodeId,
    timestep: Timestep,
    payload: Option<P>,
) -> Result<Placement, TransitError> {
    if world.state(start).is_none() {
        return Err(TransitError::UnknownNode { node: start });
    }
    let mut particle = world.mint(start, timestep, to);
    particle.set_payload(payload);
    // state checked above; the borrow is re-taken after the mint.
    if let Some(state) = world.state_mut(start) {
        state.push_front(particle);
    }
    move_particle(world, start, to, timestep)
}
