//! The timestep loop.

use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use perc_core::{NodeId, ParticleId, RoutingError, Timestep};
use perc_dynamics::{DynamicsError, PolicyOutcome};
use perc_graph::Topology;
use perc_routing::broadcast_update;
use perc_sim::{Placement, World};

use crate::config::{ConfigError, RunConfig, VisitOrder};
use crate::metrics::RunMetrics;

// ── EngineError ────────────────────────────────────────────────

/// Errors surfaced by the driver.
///
/// Every variant is fatal to the run: the simulator has no transient
/// failure domain, so the first invariant breach stops the loop and
/// propagates with full context.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// The run configuration failed validation.
    Config(ConfigError),
    /// A routing round failed.
    Routing(RoutingError),
    /// A policy invocation failed.
    Policy {
        /// The policy that failed.
        policy: &'static str,
        /// The node being visited.
        node: NodeId,
        /// The tick of the failure.
        timestep: Timestep,
        /// The underlying policy error.
        reason: DynamicsError,
    },
    /// An extra periodic update failed.
    Update {
        /// The update's configured name.
        name: &'static str,
        /// The tick of the failure.
        timestep: Timestep,
        /// The update's error message.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Routing(e) => write!(f, "routing round failed: {e}"),
            Self::Policy {
                policy,
                node,
                timestep,
                reason,
            } => {
                write!(
                    f,
                    "policy '{policy}' failed at node {node}, timestep {timestep}: {reason}"
                )
            }
            Self::Update {
                name,
                timestep,
                reason,
            } => {
                write!(f, "update '{name}' failed at timestep {timestep}: {reason}")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Routing(e) => Some(e),
            Self::Policy { reason, .. } => Some(reason),
            Self::Update { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── RunReport ──────────────────────────────────────────────────

/// The result of a collected run: one hook sample per timestep
/// (including the pre-simulation sentinel) plus the run counters.
pub struct RunReport<T> {
    /// Hook samples keyed by the timestep they were taken after;
    /// `Timestep::PRESEED` holds the sample taken before the first tick.
    pub collected: BTreeMap<Timestep, T>,
    /// Counters accumulated over the run.
    pub metrics: RunMetrics,
}

// ── run ────────────────────────────────────────────────────────

/// Run the configured number of ticks without data collection.
pub fn run<P: Clone>(
    world: &mut World<P>,
    config: &RunConfig<P>,
) -> Result<RunMetrics, EngineError> {
    run_collecting(world, config, |_| ()).map(|report| report.metrics)
}

/// Run the configured number of ticks, sampling `collect` once before
/// the first tick and once after every tick.
///
/// The hook's return values are recorded, never interpreted.
pub fn run_collecting<P, T, F>(
    world: &mut World<P>,
    config: &RunConfig<P>,
    mut collect: F,
) -> Result<RunReport<T>, EngineError>
where
    P: Clone,
    F: FnMut(&World<P>) -> T,
{
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut metrics = RunMetrics::default();
    let mut collected = BTreeMap::new();
    collected.insert(Timestep::PRESEED, collect(world));

    let canonical = world.topology().nodes();
    for tick in 0..config.timesteps {
        let timestep = Timestep(tick);
        log::trace!("timestep {timestep}");

        // Routing rounds run before any movement; tables produced here
        // only become visible to lookups on later ticks.
        if let Some(interval) = config.routing_interval {
            if tick % interval == 0 {
                log::debug!("routing round at timestep {timestep}");
                for &node in &canonical {
                    broadcast_update(world, node, timestep).map_err(EngineError::Routing)?;
                }
                metrics.routing_rounds += 1;
            }
        }

        let mut order = canonical.clone();
        if config.order == VisitOrder::Random {
            order.shuffle(&mut rng);
        }

        let mut processed: HashSet<ParticleId> = HashSet::new();
        for &node in &order {
            visit_node(
                world,
                config,
                node,
                timestep,
                &canonical,
                &mut processed,
                &mut metrics,
                &mut rng,
            )?;
        }

        for update in &config.extra_updates {
            if tick % update.interval == 0 {
                for &node in &canonical {
                    (update.update)(world, node, timestep).map_err(|reason| {
                        EngineError::Update {
                            name: update.name,
                            timestep,
                            reason,
                        }
                    })?;
                }
            }
        }

        collected.insert(timestep, collect(world));
        metrics.ticks += 1;
    }

    Ok(RunReport { collected, metrics })
}

/// One node visit: gate, retire, dispatch, count.
#[allow(clippy::too_many_arguments)]
fn visit_node<P: Clone, R: Rng + ?Sized>(
    world: &mut World<P>,
    config: &RunConfig<P>,
    node: NodeId,
    timestep: Timestep,
    canonical: &[NodeId],
    processed: &mut HashSet<ParticleId>,
    metrics: &mut RunMetrics,
    rng: &mut R,
) -> Result<(), EngineError> {
    if config.policy.queue_gated() {
        let Some((head_id, head_target)) = world
            .state(node)
            .and_then(|state| state.head())
            .map(|head| (head.id(), head.target()))
        else {
            return Ok(());
        };
        if !processed.insert(head_id) {
            return Ok(());
        }
        if config.retire_on_arrival && head_target == node {
            if let Some(state) = world.state_mut(node) {
                if let Some(particle) = state.pop_head() {
                    state.retire(particle);
                    metrics.retired += 1;
                }
            }
            if config.respawn_on_retire {
                let target = canonical[rng.random_range(0..canonical.len())];
                let replacement = world.mint(node, timestep, target);
                if let Some(state) = world.state_mut(node) {
                    state.admit(replacement);
                }
                metrics.respawned += 1;
            }
            return Ok(());
        }
    }

    let outcome = config
        .policy
        .apply(world, node, timestep, rng)
        .map_err(|reason| EngineError::Policy {
            policy: config.policy.name(),
            node,
            timestep,
            reason,
        })?;
    match outcome {
        PolicyOutcome::Idle => metrics.stalls += 1,
        PolicyOutcome::Moved(Placement::Queued) => metrics.moves += 1,
        PolicyOutcome::Moved(Placement::Overflowed) => {
            metrics.moves += 1;
            metrics.overflows += 1;
        }
        PolicyOutcome::Gossiped { messages } => metrics.gossip_messages += messages as u64,
    }
    Ok(())
}
