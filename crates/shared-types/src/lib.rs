//! # Shared Types Crate
//!
//! Ledger value types used by every subsystem of the orchestration engine.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: amounts, assets and account ids have exactly
//!   one canonical string form, defined here. Confirmation tokens bind to these
//!   strings, so preview and execute agree byte-for-byte.
//! - **Fixed Point**: amounts are integer stroops (7 decimal places). No
//!   floating point ever touches a value that is signed or submitted.
//! - **Validated on Construction**: an `AccountId` or `Asset` that exists is
//!   well-formed.

pub mod amount;
pub mod asset;
pub mod entities;
pub mod errors;

pub use amount::*;
pub use asset::*;
pub use entities::*;
pub use errors::*;
