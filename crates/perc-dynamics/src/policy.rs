//! The closed set of dynamics policies.

use rand::Rng;

use perc_core::{NodeId, Timestep};
use perc_sim::{Placement, World};

use crate::detour::detour_at_obstacle;
use crate::error::DynamicsError;
use crate::gossip::{gossip, GossipSettings};
use crate::random_walk::random_walk;
use crate::table_forward::table_forward;

/// What one policy invocation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// Nothing qualified; the queue is retried next tick.
    Idle,
    /// One particle moved, landing as recorded.
    Moved(Placement),
    /// A gossip round ran and sent this many messages.
    Gossiped {
        /// Fresh particles originated by the fan-out.
        messages: usize,
    },
}

/// A per-node dynamics policy, dispatched exhaustively by the driver.
///
/// Policies are selected once per run; modelling them as a closed enum
/// rather than a bare function value lets the driver reason about their
/// contracts (see [`queue_gated`](Policy::queue_gated)) and keeps the
/// set checkable at compile time.
pub enum Policy<P> {
    /// Greedy walk to the first neighbour with spare room.
    RandomWalk,
    /// Shortest-path step over spare-room neighbours, random tie-break.
    DetourAtObstacle,
    /// Distance-vector forwarding with a random-walk fallback.
    TableForward,
    /// Drain-merge-fan-out epidemic dissemination.
    Gossip(GossipSettings<P>),
}

impl<P: Clone> Policy<P> {
    /// Short name for logs and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomWalk => "random_walk",
            Self::DetourAtObstacle => "detour_at_obstacle",
            Self::TableForward => "table_forward",
            Self::Gossip(_) => "gossip",
        }
    }

    /// Whether the driver should only invoke this policy on a node with
    /// a non-empty queue.
    ///
    /// True for the movement policies, which move an existing head
    /// particle at most once per invocation. False for gossip, which
    /// must visit every node every tick — an empty drain is fine and
    /// the fan-out must still run.
    pub fn queue_gated(&self) -> bool {
        !matches!(self, Self::Gossip(_))
    }

    /// Apply the policy for `node` at `timestep`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        world: &mut World<P>,
        node: NodeId,
        timestep: Timestep,
        rng: &mut R,
    ) -> Result<PolicyOutcome, DynamicsError> {
        let outcome = match self {
            Self::RandomWalk => movement_outcome(random_walk(world, node, timestep)?),
            Self::DetourAtObstacle => {
                movement_outcome(detour_at_obstacle(world, node, timestep, rng)?)
            }
            Self::TableForward => movement_outcome(table_forward(world, node, timestep)?),
            Self::Gossip(settings) => PolicyOutcome::Gossiped {
                messages: gossip(world, node, timestep, settings, rng)?,
            },
        };
        Ok(outcome)
    }
}

fn movement_outcome(placement: Option<Placement>) -> PolicyOutcome {
    match placement {
        Some(placement) => PolicyOutcome::Moved(placement),
        None => PolicyOutcome::Idle,
    }
}

impl<P> Clone for Policy<P> {
    fn clone(&self) -> Self {
        match self {
            Self::RandomWalk => Self::RandomWalk,
            Self::DetourAtObstacle => Self::DetourAtObstacle,
            Self::TableForward => Self::TableForward,
            Self::Gossip(settings) => Self::Gossip(*settings),
        }
    }
}
