//! # Adapters
//!
//! In-memory token store and its background sweeper.

pub mod memory_store;
pub mod sweeper;

pub use memory_store::InMemoryTokenStore;
pub use sweeper::{spawn_sweeper, sweep_task};
