//! Perc: a discrete-time simulator for information propagation over
//! graph networks.
//!
//! Particles (packets, messages, opinions) hop between the nodes of an
//! arbitrary topology under one of four dynamics policies — greedy random
//! walk, shortest-path detour around congestion, distance-vector table
//! forwarding, or epidemic gossip — while per-node bounded queues decide
//! what overflows and what gets through. The driver runs the whole thing
//! tick by tick, deterministically or under a seeded shuffle, and hands
//! collected samples back for analysis.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all perc sub-crates. For most users, adding `perc` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use perc::prelude::*;
//!
//! // A 4-cycle with room for two particles per node.
//! let graph = AdjacencyGraph::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let mut world: World<()> = World::new(Box::new(graph), 2);
//!
//! // One particle at node 0, bound for the far side.
//! let particle = world.mint(NodeId(0), Timestep::ZERO, NodeId(2));
//! world.state_mut(NodeId(0)).unwrap().admit(particle);
//!
//! // Walk it there with converging routing tables along the way.
//! let mut config = RunConfig::new(Policy::TableForward, 16);
//! config.routing_interval = Some(1);
//! let metrics = run(&mut world, &config).unwrap();
//! assert_eq!(metrics.retired, 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `perc-core` | IDs, timesteps, particles, route tables, errors |
//! | [`graph`] | `perc-graph` | The `Topology` trait and the adjacency backend |
//! | [`sim`] | `perc-sim` | `World`, `NodeState`, movement primitive, seeding |
//! | [`routing`] | `perc-routing` | Distance-vector table exchange |
//! | [`dynamics`] | `perc-dynamics` | The four dynamics policies |
//! | [`engine`] | `perc-engine` | The timestep driver, run config, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`perc-core`).
pub use perc_core as types;

/// Topology trait and adjacency backend (`perc-graph`).
pub use perc_graph as graph;

/// World state, movement primitive, and seeding (`perc-sim`).
pub use perc_sim as sim;

/// Distance-vector routing-table exchange (`perc-routing`).
pub use perc_routing as routing;

/// Dynamics policies (`perc-dynamics`).
pub use perc_dynamics as dynamics;

/// The timestep-driven simulation driver (`perc-engine`).
pub use perc_engine as engine;

/// Common imports for typical perc usage.
///
/// ```rust
/// use perc::prelude::*;
/// ```
pub mod prelude {
    // Core ids and records
    pub use perc_core::{
        Hop, NodeId, Particle, ParticleId, ParticleSource, RouteEntry, RouteTable,
        RoutingHistory, Timestep,
    };

    // Errors
    pub use perc_core::{RoutingError, TransitError};
    pub use perc_dynamics::DynamicsError;
    pub use perc_engine::{ConfigError, EngineError};
    pub use perc_graph::GraphError;

    // Topology
    pub use perc_graph::{AdjacencyGraph, Topology};

    // World and movement
    pub use perc_sim::{
        move_particle, seed_particle, seed_payloads, seed_traffic, send_new_particle, NodeState,
        Placement, World,
    };

    // Routing
    pub use perc_routing::{broadcast_update, latest_routing_table};

    // Dynamics
    pub use perc_dynamics::{GossipSettings, Policy, PolicyOutcome};

    // Engine
    pub use perc_engine::{
        run, run_collecting, PeriodicUpdate, RunConfig, RunMetrics, RunReport, VisitOrder,
    };
}
