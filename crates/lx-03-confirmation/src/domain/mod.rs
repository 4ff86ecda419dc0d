//! # Domain Module
//!
//! Token records, bound fields and store configuration.

pub mod config;
pub mod entities;

pub use config::*;
pub use entities::*;
