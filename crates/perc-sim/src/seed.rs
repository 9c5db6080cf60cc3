//! The initialization contract: occupancy-based traffic and per-node
//! payloads.

use rand::Rng;

use perc_core::{NodeId, Timestep};
use perc_graph::Topology;

use crate::world::World;

/// Seed initial traffic across the world.
///
/// For every node and every queue slot, a particle is created with
/// probability `occupancy` (so a node's expected initial load is
/// `occupancy * capacity`). Targets are drawn uniformly from the whole
/// node set; a particle may be seeded on its own target, which the driver
/// retires on first visit when arrival retirement is enabled.
///
/// Nodes are visited in canonical order and all randomness comes from
/// `rng`, so an identical seed reproduces placement and id assignment
/// exactly on a fresh world.
pub fn seed_traffic<P, R: Rng + ?Sized>(world: &mut World<P>, occupancy: f64, rng: &mut R) {
    let nodes = world.topology().nodes();
    for &node in &nodes {
        let capacity = match world.state(node) {
            Some(state) => state.capacity(),
            None => continue,
        };
        for _ in 0..capacity {
            if rng.random::<f64>() < occupancy {
                let target = nodes[rng.random_range(0..nodes.len())];
                let particle = world.mint(node, Timestep::ZERO, target);
                if let Some(state) = world.state_mut(node) {
                    state.admit(particle);
                }
            }
        }
    }
}

/// Assign every node an initial payload drawn from `generator`.
///
/// Gossip mode's opinion seeding. Nodes are visited in canonical order,
/// so a deterministic generator over a seeded `rng` is reproducible.
pub fn seed_payloads<P, R, F>(world: &mut World<P>, rng: &mut R, mut generator: F)
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> P,
{
    let nodes = world.topology().nodes();
    for node in nodes {
        let payload = generator(rng);
        if let Some(state) = world.state_mut(node) {
            state.set_payload(Some(payload));
        }
    }
}

/// Convenience for tests and callers seeding one particle by hand.
///
/// Mints a particle at `start` targeting `target` and admits it to
/// `start`'s queue, returning whether it was queued or overflowed.
pub fn seed_particle<P>(
    world: &mut World<P>,
    start: NodeId,
    target: NodeId,
) -> Option<crate::state::Placement> {
    world.state(start)?;
    let particle = world.mint(start, Timestep::ZERO, target);
    world.state_mut(start).map(|state| state.admit(particle))
}
