//! # Domain Module
//!
//! Structured failure reports and classification results.

pub mod entities;

pub use entities::*;
