//! # Ports
//!
//! Inbound: the orchestration API. Outbound: ledger reads, path finding,
//! identity, history and notifications.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
