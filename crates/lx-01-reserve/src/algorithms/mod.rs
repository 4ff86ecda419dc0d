//! # Algorithms Module
//!
//! Reserve arithmetic and pre-flight balance checks.

pub mod reserve;

pub use reserve::{
    balance_breakdown, ensure_spendable, minimum_reserve, spendable_balance,
    BASE_RESERVE_MULTIPLIER,
};
