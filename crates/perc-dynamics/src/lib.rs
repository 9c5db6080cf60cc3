//! Particle dynamics policies.
//!
//! A policy decides, for one node in one timestep, where the node's
//! queued traffic goes next. The four policies form a closed set behind
//! the [`Policy`] enum so the driver can dispatch exhaustively:
//!
//! - **Random walk** — first neighbour with spare room, in iteration order.
//! - **Detour at obstacle** — random choice among the spare-room
//!   neighbours closest (by hop count) to the particle's target.
//! - **Table forward** — follow the latest distance-vector table, falling
//!   back to a random walk for unknown destinations.
//! - **Gossip** — drain the queue into the node's opinion, then fan the
//!   merged opinion out to `k` random neighbours.
//!
//! Movement policies call the movement primitive at most once per
//! invocation; gossip originates one particle per fan-out neighbour.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod detour;
pub mod error;
pub mod gossip;
pub mod policy;
pub mod random_walk;
pub mod table_forward;

pub use detour::detour_at_obstacle;
pub use error::DynamicsError;
pub use gossip::{gossip, GossipSettings};
pub use policy::{Policy, PolicyOutcome};
pub use random_walk::random_walk;
pub use table_forward::table_forward;
