//! Detour-at-obstacle dynamics: shortest path, routed around congestion.

use rand::seq::IndexedRandom;
use rand::Rng;

use perc_core::{NodeId, Timestep, TransitError};
use perc_graph::Topology;
use perc_sim::{move_particle, Placement, World};

use crate::error::DynamicsError;

/// Move the head particle toward its target, detouring around full
/// neighbours.
///
/// Among the neighbours with spare room and a finite hop distance to the
/// particle's target, one of those at minimum distance is chosen
/// uniformly at random. If no neighbour has spare room (or none can
/// reach the target) the particle waits (`Ok(None)`).
pub fn detour_at_obstacle<P, R: Rng + ?Sized>(
    world: &mut World<P>,
    node: NodeId,
    timestep: Timestep,
    rng: &mut R,
) -> Result<Option<Placement>, DynamicsError> {
    let target = {
        let state = world
            .state(node)
            .ok_or(TransitError::UnknownNode { node })?;
        state
            .head()
            .ok_or(TransitError::EmptyQueue { node })?
            .target()
    };

    // Collect the spare-room neighbours achieving the minimum distance.
    let mut best: Vec<NodeId> = Vec::new();
    let mut best_distance = u32::MAX;
    for neighbour in world.topology().neighbours(node) {
        let free = world.state(neighbour).is_some_and(|s| s.has_room());
        if !free {
            continue;
        }
        let Some(distance) = world.topology().hop_distance(neighbour, target) else {
            continue;
        };
        if distance < best_distance {
            best_distance = distance;
            best.clear();
        }
        if distance == best_distance {
            best.push(neighbour);
        }
    }

    let Some(&next) = best.choose(rng) else {
        return Ok(None);
    };
    Ok(Some(move_particle(world, node, next, timestep)?))
}
