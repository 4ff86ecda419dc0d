//! # Failure Entities

use serde::{Deserialize, Serialize};
use shared_types::{Asset, OperationKind};

/// Operation result code for an operation that applied.
pub const OPERATION_SUCCESS: &str = "op_success";

/// Transaction result code when one or more operations failed.
pub const TRANSACTION_FAILED: &str = "tx_failed";

/// Sub-condition attached to an operation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureDetail {
    /// An account in the path has no trustline for `asset`.
    NoTrust {
        /// Asset lacking a trustline
        asset: Asset,
    },
    /// Not enough of `asset` to cover the operation.
    Underfunded {
        /// Asset that ran short
        asset: Asset,
    },
    /// Receiving trustline for `asset` is at its limit.
    LineFull {
        /// Asset whose line is full
        asset: Asset,
    },
    /// No structured detail.
    Generic,
}

impl FailureDetail {
    /// Asset carried by the detail, if any.
    pub fn asset(&self) -> Option<&Asset> {
        match self {
            FailureDetail::NoTrust { asset }
            | FailureDetail::Underfunded { asset }
            | FailureDetail::LineFull { asset } => Some(asset),
            FailureDetail::Generic => None,
        }
    }
}

/// One operation's result inside a failed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFailure {
    /// Operation type.
    pub kind: OperationKind,
    /// Raw operation result code, e.g. `op_underfunded`.
    pub code: String,
    /// Structured sub-condition.
    pub detail: FailureDetail,
}

impl OperationFailure {
    /// Failure without structured detail.
    pub fn new(kind: OperationKind, code: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            detail: FailureDetail::Generic,
        }
    }

    /// Attach a detail, builder style.
    pub fn with_detail(mut self, detail: FailureDetail) -> Self {
        self.detail = detail;
        self
    }

    /// True if this operation applied.
    pub fn succeeded(&self) -> bool {
        self.code == OPERATION_SUCCESS
    }
}

/// Result codes extracted from a rejected or failed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    /// Transaction-level code, e.g. `tx_failed` or `tx_bad_seq`.
    pub transaction_code: String,
    /// Per-operation results, in operation order.
    pub operations: Vec<OperationFailure>,
}

impl FailureReport {
    /// Report with only a transaction-level code.
    pub fn transaction(code: impl Into<String>) -> Self {
        Self {
            transaction_code: code.into(),
            operations: Vec::new(),
        }
    }

    /// `tx_failed` with one failing operation.
    pub fn operation(failure: OperationFailure) -> Self {
        Self {
            transaction_code: TRANSACTION_FAILED.to_string(),
            operations: vec![failure],
        }
    }

    /// First operation that did not apply.
    pub fn failing_operation(&self) -> Option<&OperationFailure> {
        self.operations.iter().find(|op| !op.succeeded())
    }
}

/// Where a classification message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSource {
    /// Composite key in the result-code table.
    CompositeCode,
    /// Bare code in the result-code table.
    ResultCode,
    /// Operation-type reason table.
    OperationReason,
    /// Common-operations reason table.
    CommonReason,
    /// Humanized generic fallback.
    Fallback,
}

/// User-facing classification of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Message for the caller.
    pub message: String,
    /// Raw transaction code.
    pub transaction_code: String,
    /// Raw code of the failing operation, if any.
    pub operation_code: Option<String>,
    /// Type of the failing operation, if any.
    pub operation_kind: Option<OperationKind>,
    /// True for sequence conflicts and transient network conditions.
    pub retryable: bool,
    /// Table the message was taken from.
    pub source: MessageSource,
}

impl Classification {
    /// Most specific raw code: the operation code if present.
    pub fn code(&self) -> &str {
        self.operation_code
            .as_deref()
            .unwrap_or(&self.transaction_code)
    }
}
