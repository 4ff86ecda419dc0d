//! # Domain Module
//!
//! Value objects and errors for reserve arithmetic.

pub mod errors;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
