//! Per-run counters accumulated by the driver.

/// What happened over one simulation run.
///
/// Plain counters, populated by the driver and read by callers after
/// the run; nothing here feeds back into the simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Ticks executed.
    pub ticks: u64,
    /// Routing rounds performed.
    pub routing_rounds: u64,
    /// Successful particle moves (queued or overflowed).
    pub moves: u64,
    /// Moves that landed in a destination's overflow.
    pub overflows: u64,
    /// Particles diverted to `retired` on arrival.
    pub retired: u64,
    /// Replacement particles minted after retirements.
    pub respawned: u64,
    /// Gossip messages originated by fan-out.
    pub gossip_messages: u64,
    /// Policy invocations that found no eligible move.
    pub stalls: u64,
}
