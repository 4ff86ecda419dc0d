//! # Ports
//!
//! Inbound: the executor API. Outbound: the ledger network client.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
