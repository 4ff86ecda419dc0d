//! # Transaction Outcomes
//!
//! The terminal value every orchestrator returns. A `Timeout` is not a
//! failure: the transaction may still land after polling stops.

use lx_02_error_classifier::Classification;
use serde::{Deserialize, Serialize};
use shared_types::TransactionHash;

/// Base64 XDR payload with its decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XdrPayload {
    /// Payload as received.
    pub base64: String,
    /// Decoded bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Network status observed last before polling stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LastKnownStatus {
    /// Accepted by the node, not yet in a ledger.
    Pending,
    /// Status endpoint did not know the hash.
    NotFound,
}

/// Diagnostic detail attached to a failed outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetails {
    /// Hash, if the transaction got far enough to have one.
    pub hash: Option<TransactionHash>,
    /// Raw transaction result code.
    pub transaction_code: Option<String>,
    /// Raw operation result codes, in operation order.
    pub operation_codes: Vec<String>,
    /// Raw error text for client errors.
    pub raw_error: Option<String>,
    /// True if resubmitting may succeed (sequence conflict, busy network).
    pub retryable: bool,
    /// Result XDR, when the network returned one.
    pub result_xdr: Option<XdrPayload>,
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransactionOutcome {
    /// Included in a ledger and applied.
    Success {
        /// Transaction hash.
        hash: TransactionHash,
        /// Ledger sequence it landed in.
        ledger: Option<u32>,
        /// Result metadata XDR.
        result_meta: Option<XdrPayload>,
        /// Envelope XDR.
        envelope: Option<XdrPayload>,
    },
    /// Definitively rejected.
    Failed {
        /// Most specific raw code.
        code: String,
        /// Message for the caller.
        user_message: String,
        /// Diagnostics.
        details: FailureDetails,
    },
    /// Poll budget exhausted without a verdict.
    Timeout {
        /// Transaction hash to check later.
        hash: TransactionHash,
        /// Status seen on the last poll.
        last_known_status: LastKnownStatus,
        /// Polls made.
        attempts: u32,
    },
}

impl TransactionOutcome {
    /// Failed outcome from a classification.
    pub fn from_classification(
        classification: Classification,
        hash: Option<TransactionHash>,
        operation_codes: Vec<String>,
        result_xdr: Option<XdrPayload>,
    ) -> Self {
        TransactionOutcome::Failed {
            code: classification.code().to_string(),
            user_message: classification.message.clone(),
            details: FailureDetails {
                hash,
                transaction_code: Some(classification.transaction_code),
                operation_codes,
                raw_error: None,
                retryable: classification.retryable,
                result_xdr,
            },
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionOutcome::Success { .. } => "success",
            TransactionOutcome::Failed { .. } => "failed",
            TransactionOutcome::Timeout { .. } => "timeout",
        }
    }

    /// Hash, if known.
    pub fn hash(&self) -> Option<&TransactionHash> {
        match self {
            TransactionOutcome::Success { hash, .. } | TransactionOutcome::Timeout { hash, .. } => {
                Some(hash)
            }
            TransactionOutcome::Failed { details, .. } => details.hash.as_ref(),
        }
    }

    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, TransactionOutcome::Success { .. })
    }

    /// True for `Timeout`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransactionOutcome::Timeout { .. })
    }
}
