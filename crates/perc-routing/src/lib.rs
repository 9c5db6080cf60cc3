//! Distance-vector routing-table exchange.
//!
//! Nodes converge on shortest-hop routes by periodically advertising
//! their tables to their neighbours, RIP-style. The protocol is
//! deliberately simple: no split horizon, no poisoning, no expiry —
//! convergence on a static graph is a tested property, not an enforced
//! contract.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod protocol;

pub use protocol::{broadcast_update, latest_routing_table, merge_advertisement};
