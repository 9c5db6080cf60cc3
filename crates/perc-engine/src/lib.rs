//! Timestep-driven simulation driver.
//!
//! The driver runs a finite loop of ticks over a [`perc_sim::World`]:
//! periodic routing rounds first, then one policy visit per node in a
//! deterministic or per-tick-shuffled order with at-most-once-per-tick
//! particle processing, then any extra periodic updates, then the
//! collection hook. Configuration is a plain validated struct; progress
//! counters accumulate in [`RunMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod metrics;

pub use config::{ConfigError, PeriodicUpdate, RunConfig, VisitOrder};
pub use driver::{run, run_collecting, EngineError, RunReport};
pub use metrics::RunMetrics;
