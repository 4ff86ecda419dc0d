//! # Outbound Ports
//!
//! Ledger network client. Signing and XDR encoding live behind this port.

use crate::domain::{SignedEnvelope, SigningKey, SubmitterError, TransactionDraft};
use async_trait::async_trait;
use lx_02_error_classifier::FailureReport;
use serde::{Deserialize, Serialize};
use shared_types::TransactionHash;

/// Immediate verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitStatus {
    /// Accepted for inclusion.
    Pending,
    /// Already known to the node.
    Duplicate,
    /// Node is overloaded; nothing was queued.
    TryAgainLater,
    /// Rejected outright.
    Error,
}

/// Response to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    /// Verdict.
    pub status: SubmitStatus,
    /// Hash of the submitted transaction.
    pub hash: TransactionHash,
    /// Result codes when `status == Error`.
    pub error: Option<FailureReport>,
    /// Base64 result XDR when `status == Error`.
    pub error_result_xdr: Option<String>,
}

/// Status endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Not (yet) known.
    NotFound,
    /// Applied.
    Success {
        /// Ledger sequence.
        ledger: u32,
        /// Base64 envelope XDR.
        envelope_xdr: Option<String>,
        /// Base64 result XDR.
        result_xdr: Option<String>,
        /// Base64 result meta XDR.
        result_meta_xdr: Option<String>,
    },
    /// Included but failed.
    Failed {
        /// Result codes.
        report: FailureReport,
        /// Base64 result XDR.
        result_xdr: Option<String>,
    },
}

/// Ledger network client.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Encode and sign a draft for the configured network.
    async fn sign(
        &self,
        draft: &TransactionDraft,
        key: &SigningKey,
    ) -> Result<SignedEnvelope, SubmitterError>;

    /// Submit a signed envelope.
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmitResponse, SubmitterError>;

    /// Query the status of a submitted transaction.
    async fn transaction_status(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, SubmitterError>;
}
