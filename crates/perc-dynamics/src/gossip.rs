//! Epidemic gossip dynamics.

use rand::Rng;

use perc_core::{NodeId, Timestep, TransitError};
use perc_graph::Topology;
use perc_sim::{send_new_particle, World};

use crate::error::DynamicsError;

/// Configuration for gossip dissemination.
pub struct GossipSettings<P> {
    /// Number of neighbours to send to each round, capped at the node's
    /// degree. Zero disables fan-out entirely.
    pub fan_out: usize,
    /// Associative combine applied when folding incoming opinions into
    /// the node's own. Must be order-insensitive (`min`, `max`, sum) for
    /// deterministic convergence under a random visitation order.
    pub combine: fn(P, P) -> P,
}

impl<P> Clone for GossipSettings<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for GossipSettings<P> {}

/// One gossip round for `node`: drain, merge, fan out.
///
/// The whole queue is drained in order; each message's payload is folded
/// into the node's opinion with the combine function (a node with no
/// opinion adopts the first incoming one), and the spent message retires
/// at this node. The updated opinion is then sent to `fan_out` distinct
/// neighbours chosen uniformly without replacement, one fresh particle
/// each. Returns the number of messages sent.
///
/// Unlike the movement policies, gossip is meaningful on an empty queue
/// — the fan-out still runs — so the driver invokes it unconditionally.
pub fn gossip<P, R>(
    world: &mut World<P>,
    node: NodeId,
    timestep: Timestep,
    settings: &GossipSettings<P>,
    rng: &mut R,
) -> Result<usize, DynamicsError>
where
    P: Clone,
    R: Rng + ?Sized,
{
    let opinion = {
        let state = world
            .state_mut(node)
            .ok_or(TransitError::UnknownNode { node })?;
        let mut opinion = state.take_payload();
        for mut message in state.take_queue() {
            if let Some(incoming) = message.take_payload() {
                opinion = Some(match opinion {
                    Some(current) => (settings.combine)(current, incoming),
                    None => incoming,
                });
            }
            state.retire(message);
        }
        state.set_payload(opinion.clone());
        opinion
    };

    let neighbours = world.topology().neighbours(node);
    let fan_out = settings.fan_out.min(neighbours.len());
    if fan_out == 0 {
        return Ok(0);
    }
    let picks = rand::seq::index::sample(rng, neighbours.len(), fan_out);
    for i in picks.iter() {
        send_new_particle(world, node, neighbours[i], timestep, opinion.clone())?;
    }
    Ok(fan_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perc_graph::AdjacencyGraph;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settings(fan_out: usize) -> GossipSettings<i64> {
        GossipSettings {
            fan_out,
            combine: std::cmp::min,
        }
    }

    fn triangle_world(capacity: usize) -> World<i64> {
        let graph = AdjacencyGraph::new(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        World::new(Box::new(graph), capacity)
    }

    #[test]
    fn drain_folds_incoming_opinions() {
        let mut world = triangle_world(4);
        world.state_mut(NodeId(0)).unwrap().set_payload(Some(5));
        for value in [9, 2, 7] {
            let mut p = world.mint(NodeId(1), Timestep::ZERO, NodeId(0));
            p.set_payload(Some(value));
            world.state_mut(NodeId(0)).unwrap().admit(p);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        gossip(&mut world, NodeId(0), Timestep(0), &settings(0), &mut rng).unwrap();

        let state = world.state(NodeId(0)).unwrap();
        assert_eq!(state.payload(), Some(&2));
        assert_eq!(state.queue_len(), 0);
        // Spent messages retire at the node that consumed them.
        assert_eq!(state.retired().len(), 3);
    }

    #[test]
    fn node_without_opinion_adopts_the_first_incoming() {
        let mut world = triangle_world(4);
        let mut p = world.mint(NodeId(1), Timestep::ZERO, NodeId(0));
        p.set_payload(Some(4));
        world.state_mut(NodeId(0)).unwrap().admit(p);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        gossip(&mut world, NodeId(0), Timestep(0), &settings(0), &mut rng).unwrap();
        assert_eq!(world.state(NodeId(0)).unwrap().payload(), Some(&4));
    }

    #[test]
    fn fan_out_sends_fresh_particles_with_the_merged_opinion() {
        let mut world = triangle_world(4);
        world.state_mut(NodeId(0)).unwrap().set_payload(Some(3));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let sent = gossip(&mut world, NodeId(0), Timestep(0), &settings(2), &mut rng).unwrap();
        assert_eq!(sent, 2);

        for n in [1, 2] {
            let state = world.state(NodeId(n)).unwrap();
            assert_eq!(state.queue_len(), 1, "neighbour {n}");
            let message = state.head().unwrap();
            assert_eq!(message.payload(), Some(&3));
            assert_eq!(message.target(), NodeId(n));
            assert_eq!(message.start(), NodeId(0));
        }
    }

    #[test]
    fn fan_out_caps_at_degree() {
        let mut world = triangle_world(4);
        world.state_mut(NodeId(0)).unwrap().set_payload(Some(1));
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let sent = gossip(&mut world, NodeId(0), Timestep(0), &settings(50), &mut rng).unwrap();
        assert_eq!(sent, 2);
    }

    #[test]
    fn zero_fan_out_sends_nothing() {
        let mut world = triangle_world(4);
        world.state_mut(NodeId(0)).unwrap().set_payload(Some(1));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sent = gossip(&mut world, NodeId(0), Timestep(0), &settings(0), &mut rng).unwrap();
        assert_eq!(sent, 0);
        assert_eq!(world.particles().count(), 0);
    }

    #[test]
    fn empty_queue_still_fans_out() {
        let mut world = triangle_world(4);
        world.state_mut(NodeId(0)).unwrap().set_payload(Some(8));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let sent = gossip(&mut world, NodeId(0), Timestep(0), &settings(1), &mut rng).unwrap();
        assert_eq!(sent, 1);
    }

    #[test]
    fn messages_to_full_neighbours_overflow() {
        let mut world = triangle_world(1);
        world.state_mut(NodeId(0)).unwrap().set_payload(Some(8));
        // Fill both neighbours.
        for n in [1u32, 2] {
            let p = world.mint(NodeId(n), Timestep::ZERO, NodeId(0));
            world.state_mut(NodeId(n)).unwrap().admit(p);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let sent = gossip(&mut world, NodeId(0), Timestep(0), &settings(2), &mut rng).unwrap();
        assert_eq!(sent, 2);
        let overflowed: usize = [1u32, 2]
            .iter()
            .map(|&n| world.state(NodeId(n)).unwrap().overflow().len())
            .sum();
        assert_eq!(overflowed, 2);
    }
}
