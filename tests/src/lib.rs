//! # Ledger Orchestration Test Suite
//!
//! Scenarios that cross subsystem boundaries. Per-crate behaviour is tested
//! next to the code.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── fixtures.rs     # in-memory ledger, accounts, wired service
//! │   ├── flows.rs        # preview → execute journeys through LX-01..05
//! │   └── properties.rs   # proptest invariants over public APIs
//! └── benches/            # criterion benchmarks of the pure algorithms
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lx-tests
//! cargo test -p lx-tests integration::flows::
//! cargo bench -p lx-tests
//! ```

#![allow(dead_code)]

pub mod integration;
