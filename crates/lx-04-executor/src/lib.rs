//! # LX-04 Transaction Executor
//!
//! Builds a transaction for a set of operations, signs it, submits it and
//! drives the submit → poll → terminal outcome state machine, classifying
//! failures on the way out.
//!
//! **Subsystem ID:** 04
//!
//! ## State Machine
//!
//! ```text
//! Built ──sign──→ Signed ──submit──→ Submitted
//!                                      │
//!              PENDING / DUPLICATE ────┼──→ poll ×N ──→ Success | Failed | Timeout
//!              ERROR / TRY_AGAIN_LATER ┴──→ Failed
//! ```
//!
//! | Outcome | When |
//! |---------|------|
//! | Success | status endpoint reports the transaction applied |
//! | Failed | rejected at submit, failed in ledger, or client error |
//! | Timeout | every poll returned `NOT_FOUND` |
//!
//! ## Module Structure
//!
//! ```text
//! lx-04-executor/
//! ├── domain/          # typestate, outcome, config, signing key, errors
//! ├── algorithms/      # defensive XDR decoding
//! ├── ports/           # TransactionExecutorApi, TransactionSubmitter
//! ├── adapters/        # ScriptedSubmitter
//! └── service.rs       # TransactionExecutor
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ScriptedSubmitter, SubmitScript};
pub use algorithms::decode_xdr;
pub use domain::{
    Built, ExecutorConfig, ExecutorError, FailureDetails, LastKnownStatus, SignedEnvelope,
    SigningKey, Signed, SubmitterError, Submitted, TimeBounds, Transaction, TransactionDraft,
    TransactionOutcome, XdrPayload, MAX_OPERATIONS,
};
pub use ports::{
    ExecutionRequest, SubmitResponse, SubmitStatus, TransactionExecutorApi, TransactionStatus,
    TransactionSubmitter,
};
pub use service::TransactionExecutor;
