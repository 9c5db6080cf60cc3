//! Route tables and their per-node snapshot history.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::id::{NodeId, Timestep};

/// One routing-table entry: the hop cost to a destination and the
/// neighbour to forward through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    /// Shortest known hop count to the destination.
    pub cost: u32,
    /// The adjacent node to forward through.
    pub next_hop: NodeId,
}

/// A full table: destination node to route entry.
///
/// `IndexMap` keeps iteration in insertion order, so table merges and
/// debugging output are deterministic for a given exchange sequence.
pub type RouteTable = IndexMap<NodeId, RouteEntry>;

/// Snapshots of the table to retain; everything older than the latest
/// published snapshot and the in-progress next one is unreachable by
/// [`RoutingHistory::latest_before`] and is pruned.
pub const RETAINED_SNAPSHOTS: usize = 2;

/// A node's routing tables over time, keyed by the timestep each snapshot
/// was produced for.
///
/// A fresh history is seeded at [`Timestep::PRESEED`] with the trivial
/// self-route, so a lookup strictly before any run timestep always finds
/// a table. Snapshots beyond [`RETAINED_SNAPSHOTS`] are discarded oldest
/// first at insertion time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoutingHistory {
    snapshots: BTreeMap<Timestep, RouteTable>,
}

impl RoutingHistory {
    /// A history seeded with the self-route `{node: (0, node)}` at the
    /// pre-simulation sentinel.
    pub fn seeded(node: NodeId) -> Self {
        let mut table = RouteTable::new();
        table.insert(
            node,
            RouteEntry {
                cost: 0,
                next_hop: node,
            },
        );
        let mut snapshots = BTreeMap::new();
        snapshots.insert(Timestep::PRESEED, table);
        Self { snapshots }
    }

    /// The table at the greatest key strictly less than `timestep`.
    ///
    /// Same-tick and future snapshots are invisible: routing information
    /// produced in a round only takes effect on later ticks.
    pub fn latest_before(&self, timestep: Timestep) -> Option<&RouteTable> {
        self.snapshots
            .range(..timestep)
            .next_back()
            .map(|(_, table)| table)
    }

    /// The snapshot recorded exactly at `timestep`, if any.
    pub fn snapshot_at(&self, timestep: Timestep) -> Option<&RouteTable> {
        self.snapshots.get(&timestep)
    }

    /// Record (or replace) the snapshot for `timestep`, pruning the
    /// oldest snapshots beyond the retention bound.
    pub fn record(&mut self, timestep: Timestep, table: RouteTable) {
        self.snapshots.insert(timestep, table);
        while self.snapshots.len() > RETAINED_SNAPSHOTS {
            self.snapshots.pop_first();
        }
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the history holds no snapshot at all.
    ///
    /// Only true for a default-constructed history; seeded histories
    /// always retain at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cost: u32, next_hop: u32) -> RouteEntry {
        RouteEntry {
            cost,
            next_hop: NodeId(next_hop),
        }
    }

    #[test]
    fn seeded_history_resolves_self_route() {
        let history = RoutingHistory::seeded(NodeId(3));
        let table = history.latest_before(Timestep::ZERO).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&NodeId(3)), Some(&entry(0, 3)));
    }

    #[test]
    fn lookup_is_strictly_before() {
        let mut history = RoutingHistory::seeded(NodeId(0));
        let mut table = RouteTable::new();
        table.insert(NodeId(1), entry(1, 1));
        history.record(Timestep(2), table);

        // At timestep 2 the new snapshot is still invisible.
        let visible = history.latest_before(Timestep(2)).unwrap();
        assert!(!visible.contains_key(&NodeId(1)));

        // From timestep 3 onward it is the latest.
        let visible = history.latest_before(Timestep(3)).unwrap();
        assert!(visible.contains_key(&NodeId(1)));
    }

    #[test]
    fn empty_history_has_no_table() {
        let history = RoutingHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.latest_before(Timestep(100)), None);
    }

    #[test]
    fn retention_prunes_oldest_snapshots() {
        let mut history = RoutingHistory::seeded(NodeId(0));
        for t in 1..10 {
            history.record(Timestep(t), RouteTable::new());
            assert!(history.len() <= RETAINED_SNAPSHOTS);
        }
        // The newest snapshot plus its predecessor survive.
        assert!(history.snapshot_at(Timestep(9)).is_some());
        assert!(history.snapshot_at(Timestep(8)).is_some());
        assert!(history.snapshot_at(Timestep(7)).is_none());
    }

    #[test]
    fn retention_never_breaks_round_lookups() {
        // Simulate the driver's pattern: a round at tick t reads strictly
        // before t and records at t + 1. The table a round needs must
        // never have been pruned by the previous round's record.
        let mut history = RoutingHistory::seeded(NodeId(0));
        for t in 0..20 {
            let timestep = Timestep(t);
            assert!(
                history.latest_before(timestep).is_some(),
                "round at tick {t} lost its lookup table"
            );
            history.record(timestep.next(), RouteTable::new());
        }
    }

    proptest::proptest! {
        #[test]
        fn latest_before_always_strictly_earlier(
            records in proptest::collection::vec(0i64..50, 0..20),
            probe in -1i64..60,
        ) {
            let mut history = RoutingHistory::seeded(NodeId(0));
            for t in records {
                history.record(Timestep(t), RouteTable::new());
            }
            // Whatever was recorded, a resolved table's key is < probe.
            if let Some(_table) = history.latest_before(Timestep(probe)) {
                let key = history
                    .snapshots
                    .range(..Timestep(probe))
                    .next_back()
                    .map(|(t, _)| *t)
                    .unwrap();
                proptest::prop_assert!(key < Timestep(probe));
            }
        }
    }

    #[test]
    fn record_replaces_same_key() {
        let mut history = RoutingHistory::seeded(NodeId(0));
        let mut first = RouteTable::new();
        first.insert(NodeId(1), entry(5, 1));
        history.record(Timestep(1), first);

        let mut second = RouteTable::new();
        second.insert(NodeId(1), entry(2, 2));
        history.record(Timestep(1), second);

        let table = history.snapshot_at(Timestep(1)).unwrap();
        assert_eq!(table.get(&NodeId(1)), Some(&entry(2, 2)));
    }
}
