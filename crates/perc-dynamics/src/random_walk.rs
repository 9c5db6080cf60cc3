//! Greedy random-walk dynamics.

use perc_core::{NodeId, Timestep, TransitError};
use perc_graph::Topology;
use perc_sim::{move_particle, Placement, World};

use crate::error::DynamicsError;

/// Move the head particle to the first neighbour with spare room.
///
/// Neighbours are scanned in the topology's iteration order; the first
/// whose queue is below capacity receives the particle. If none
/// qualifies the particle stays put and is retried next tick
/// (`Ok(None)`).
///
/// # Errors
///
/// [`TransitError::EmptyQueue`] if the node has nothing to move — the
/// driver only invokes movement policies on non-empty queues.
pub fn random_walk<P>(
    world: &mut World<P>,
    node: NodeId,
    timestep: Timestep,
) -> Result<Option<Placement>, DynamicsError> {
    let state = world
        .state(node)
        .ok_or(TransitError::UnknownNode { node })?;
    if state.head().is_none() {
        return Err(TransitError::EmptyQueue { node }.into());
    }
    for neighbour in world.topology().neighbours(node) {
        let free = world.state(neighbour).is_some_and(|s| s.has_room());
        if free {
            let placement = move_particle(world, node, neighbour, timestep)?;
            return Ok(Some(placement));
        }
    }
    Ok(None)
}
