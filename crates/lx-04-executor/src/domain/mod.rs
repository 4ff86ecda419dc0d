//! # Domain Module
//!
//! Transaction typestate, outcomes, configuration, keys and errors.

pub mod config;
pub mod errors;
pub mod outcome;
pub mod signing_key;
pub mod typestate;

pub use config::*;
pub use errors::*;
pub use outcome::*;
pub use signing_key::SigningKey;
pub use typestate::*;
