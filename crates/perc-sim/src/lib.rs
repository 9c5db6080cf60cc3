//! World state and the particle movement primitive.
//!
//! A [`World`] binds a topology to per-node [`NodeState`] records and owns
//! the particle id sequence. The [`transit`] module holds the sole mutator
//! that carries a particle across an edge, enforcing the capacity and
//! double-move invariants; [`seed`] implements the initialization contract
//! (occupancy-based traffic, per-node payloads).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod seed;
pub mod state;
pub mod transit;
pub mod world;

pub use seed::{seed_particle, seed_payloads, seed_traffic};
pub use state::{NodeState, Placement};
pub use transit::{move_particle, send_new_particle};
pub use world::World;
