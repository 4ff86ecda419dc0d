//! # Adapters
//!
//! In-memory implementations of the outbound ports.

pub mod collaborators;
pub mod ledger;

pub use collaborators::{InMemoryHistoryStore, RecordingNotifier, StaticIdentityProvider};
pub use ledger::InMemoryLedger;
