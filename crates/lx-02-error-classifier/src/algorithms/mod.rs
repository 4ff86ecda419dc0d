//! # Algorithms Module
//!
//! Table-driven classification plus the best-effort text heuristics.

pub mod classify;
pub mod heuristics;
pub mod tables;

pub use classify::{classify, classify_with_asset, concerns_sent_asset, humanize_code, is_retryable_code};
pub use heuristics::heuristic_message;
