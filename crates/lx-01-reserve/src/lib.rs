//! # LX-01 Reserve & Balance Calculator
//!
//! Pure functions over an account snapshot: minimum reserve, spendable
//! balance and per-asset minimum send amounts. No I/O.
//!
//! **Subsystem ID:** 01
//!
//! ## Reserve Rule
//!
//! | Asset | Spendable |
//! |-------|-----------|
//! | Native | `balance - (2 + sub_entries) * base_reserve - pending_fee` |
//! | Credit | `balance` |
//!
//! ## Module Structure
//!
//! ```text
//! lx-01-reserve/
//! ├── domain/          # BalanceBreakdown, MinimumSendPolicy, errors
//! └── algorithms/      # minimum_reserve, spendable_balance, pre-flight checks
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

pub use algorithms::{
    balance_breakdown, ensure_spendable, minimum_reserve, spendable_balance,
    BASE_RESERVE_MULTIPLIER,
};
pub use domain::{BalanceBreakdown, MinimumSendPolicy, ReserveError};
