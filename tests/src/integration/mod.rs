//! # Integration Tests
//!
//! Every flow runs the real reserve calculator, classifier, token store and
//! executor. Only the network edge (`InMemoryLedger`, `ScriptedSubmitter`)
//! is simulated.

pub mod fixtures;
pub mod flows;
pub mod properties;
