//! # Ports
//!
//! Inbound: the token store API. Outbound: the clock.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
