//! Table lookup and the per-round advertisement step.

use perc_core::{NodeId, RouteEntry, RouteTable, RoutingError, Timestep};
use perc_graph::Topology;
use perc_sim::World;

/// The most recent routing table visible to `node` at `timestep`.
///
/// Resolves the snapshot at the greatest key strictly before `timestep`;
/// tables produced in the current round are invisible until later ticks.
///
/// # Errors
///
/// [`RoutingError::NoTableAvailable`] if no snapshot precedes `timestep`
/// — unreachable for seeded histories, guarded defensively.
pub fn latest_routing_table<P>(
    world: &World<P>,
    node: NodeId,
    timestep: Timestep,
) -> Result<&RouteTable, RoutingError> {
    let state = world
        .state(node)
        .ok_or(RoutingError::UnknownNode { node })?;
    state
        .routes()
        .latest_before(timestep)
        .ok_or(RoutingError::NoTableAvailable { node, timestep })
}

/// Merge an advertised table into a receiver's table, from the
/// receiver's perspective.
///
/// Every destination the advertiser knows is offered at `cost + 1` via
/// the advertiser. The receiver keeps its own entry unless the offer is
/// strictly cheaper: on a cost tie the current route wins, a
/// route-stability bias preserved from the original protocol.
/// Destinations only the receiver knows are untouched.
pub fn merge_advertisement(
    mut base: RouteTable,
    advertised: &RouteTable,
    via: NodeId,
) -> RouteTable {
    for (&destination, entry) in advertised {
        let offered = RouteEntry {
            cost: entry.cost.saturating_add(1),
            next_hop: via,
        };
        match base.get(&destination) {
            Some(current) if current.cost <= offered.cost => {}
            _ => {
                base.insert(destination, offered);
            }
        }
    }
    base
}

/// One node's advertisement round: push `node`'s latest table to every
/// neighbour's next snapshot.
///
/// For each neighbour, the merge starts from the neighbour's snapshot at
/// `timestep + 1` if an earlier advertiser already wrote one this round,
/// otherwise from its latest published table — so multiple advertisers
/// refine one accumulating next table rather than overwriting each
/// other. Advertisers themselves only read tables strictly before
/// `timestep`, which keeps information crossing at most one edge per
/// round regardless of node visitation order.
pub fn broadcast_update<P>(
    world: &mut World<P>,
    node: NodeId,
    timestep: Timestep,
) -> Result<(), RoutingError> {
    let advertised = latest_routing_table(world, node, timestep)?.clone();
    let next = timestep.next();
    for neighbour in world.topology().neighbours(node) {
        let state = world
            .state(neighbour)
            .ok_or(RoutingError::UnknownNode { node: neighbour })?;
        let base = match state.routes().snapshot_at(next) {
            Some(table) => table.clone(),
            None => state
                .routes()
                .latest_before(timestep)
                .ok_or(RoutingError::NoTableAvailable {
                    node: neighbour,
                    timestep,
                })?
                .clone(),
        };
        let merged = merge_advertisement(base, &advertised, node);
        if let Some(state) = world.state_mut(neighbour) {
            state.routes_mut().record(next, merged);
        }
    }
    Ok(())
}
