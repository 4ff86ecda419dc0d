//! # LX-02 Error Classifier
//!
//! Maps ledger result codes (transaction level, operation level and path
//! payment sub-codes) to a user-facing message, keeping the raw codes for
//! logs.
//!
//! **Subsystem ID:** 02
//!
//! ## Lookup Order
//!
//! 1. Composite `{operation_type}:{code}` in the result-code table
//! 2. Bare `{code}` in the result-code table
//! 3. Operation-type reason table (common table for unknown types)
//! 4. Generic fallback with the humanized code
//!
//! `{asset}` placeholders are filled from the failure detail.
//!
//! ## Module Structure
//!
//! ```text
//! lx-02-error-classifier/
//! ├── domain/          # FailureReport, FailureDetail, Classification
//! └── algorithms/      # tables, classify, heuristics (best effort)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

pub use algorithms::{
    classify, classify_with_asset, concerns_sent_asset, heuristic_message, humanize_code,
    is_retryable_code,
};
pub use domain::{
    Classification, FailureDetail, FailureReport, MessageSource, OperationFailure,
    OPERATION_SUCCESS, TRANSACTION_FAILED,
};
