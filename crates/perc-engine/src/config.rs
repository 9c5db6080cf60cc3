//! Run configuration and validation.

use std::error::Error;
use std::fmt;

use perc_core::{NodeId, Timestep};
use perc_dynamics::Policy;
use perc_sim::World;

// ── VisitOrder ─────────────────────────────────────────────────

/// The order node visits are applied within one tick.
///
/// Order decides which queued particle contends first for a shared
/// destination's remaining capacity; it never allows a particle to be
/// processed twice in one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitOrder {
    /// Canonical ascending node order — reproducible runs for tests.
    Ascending,
    /// A fresh uniform permutation every tick, drawn from the run RNG —
    /// statistical experiments.
    Random,
}

// ── PeriodicUpdate ─────────────────────────────────────────────

/// An extra per-node update applied every `interval` ticks, after
/// particle movement.
///
/// Explicit configuration data rather than loose function values: each
/// update carries its own name (for error context) and interval, and
/// nothing is shared between invocations.
pub struct PeriodicUpdate<P> {
    /// Name reported when the update fails.
    pub name: &'static str,
    /// Apply every `interval` ticks (whenever `tick % interval == 0`).
    pub interval: i64,
    /// The update itself, run once per node per firing.
    pub update: fn(&mut World<P>, NodeId, Timestep) -> Result<(), String>,
}

impl<P> Clone for PeriodicUpdate<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for PeriodicUpdate<P> {}

// ── ConfigError ────────────────────────────────────────────────

/// Errors detected during [`RunConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `timesteps` is negative.
    NegativeTimesteps {
        /// The configured value.
        value: i64,
    },
    /// `routing_interval` is zero or negative.
    InvalidRoutingInterval {
        /// The configured value.
        value: i64,
    },
    /// An extra update's interval is zero or negative.
    InvalidUpdateInterval {
        /// The update's name.
        name: &'static str,
        /// The configured value.
        value: i64,
    },
    /// `respawn_on_retire` is set without `retire_on_arrival`; nothing
    /// would ever respawn.
    RespawnWithoutRetire,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTimesteps { value } => {
                write!(f, "timesteps must be non-negative, got {value}")
            }
            Self::InvalidRoutingInterval { value } => {
                write!(f, "routing_interval must be positive, got {value}")
            }
            Self::InvalidUpdateInterval { name, value } => {
                write!(f, "update '{name}' interval must be positive, got {value}")
            }
            Self::RespawnWithoutRetire => {
                write!(f, "respawn_on_retire requires retire_on_arrival")
            }
        }
    }
}

impl Error for ConfigError {}

// ── RunConfig ──────────────────────────────────────────────────

/// Everything one simulation run needs beyond the world itself.
pub struct RunConfig<P> {
    /// The dynamics policy applied at every node visit.
    pub policy: Policy<P>,
    /// Node visitation order within a tick.
    pub order: VisitOrder,
    /// Number of ticks to run, 0-indexed with an exclusive upper bound.
    pub timesteps: i64,
    /// Run a routing round every this many ticks, before any movement
    /// in the tick. `None` disables table exchange entirely.
    pub routing_interval: Option<i64>,
    /// Seed for the run RNG; identical seeds reproduce runs exactly.
    pub seed: u64,
    /// Divert a head particle sitting on its target into `retired`
    /// instead of invoking the policy on it.
    pub retire_on_arrival: bool,
    /// When retiring an arrival, mint a replacement particle at the
    /// arrival node with a uniformly random target, keeping offered
    /// load constant.
    pub respawn_on_retire: bool,
    /// Extra periodic per-node updates, applied after movement.
    pub extra_updates: Vec<PeriodicUpdate<P>>,
}

impl<P> RunConfig<P> {
    /// A config with the given policy and tick count; ascending order,
    /// no routing rounds, seed 0, arrival retirement on, no respawn.
    pub fn new(policy: Policy<P>, timesteps: i64) -> Self {
        Self {
            policy,
            order: VisitOrder::Ascending,
            timesteps,
            routing_interval: None,
            seed: 0,
            retire_on_arrival: true,
            respawn_on_retire: false,
            extra_updates: Vec::new(),
        }
    }

    /// Check structural invariants before a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timesteps < 0 {
            return Err(ConfigError::NegativeTimesteps {
                value: self.timesteps,
            });
        }
        if let Some(interval) = self.routing_interval {
            if interval <= 0 {
                return Err(ConfigError::InvalidRoutingInterval { value: interval });
            }
        }
        for update in &self.extra_updates {
            if update.interval <= 0 {
                return Err(ConfigError::InvalidUpdateInterval {
                    name: update.name,
                    value: update.interval,
                });
            }
        }
        if self.respawn_on_retire && !self.retire_on_arrival {
            return Err(ConfigError::RespawnWithoutRetire);
        }
        Ok(())
    }
}
