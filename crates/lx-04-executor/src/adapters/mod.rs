//! # Adapters
//!
//! Scripted network client for tests and local runs.

pub mod scripted;

pub use scripted::{ScriptedSubmitter, SubmitScript};
