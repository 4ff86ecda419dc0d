//! # Domain Errors

use thiserror::Error;

/// Errors raised by the ledger network client port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitterError {
    /// Transport failure talking to the network.
    #[error("Network error: {0}")]
    Network(String),

    /// Response could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Signing the envelope failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Referenced account or asset does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SubmitterError {
    /// Stable code used in failed outcomes.
    pub fn code(&self) -> &'static str {
        match self {
            SubmitterError::Network(_) => "network_error",
            SubmitterError::MalformedResponse(_) => "malformed_response",
            SubmitterError::Signing(_) => "signing_error",
            SubmitterError::NotFound(_) => "not_found",
        }
    }
}

/// Errors building a transaction before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// A transaction needs at least one operation.
    #[error("Transaction has no operations")]
    NoOperations,

    /// More operations than the network accepts.
    #[error("Too many operations: {count}, max {max}")]
    TooManyOperations {
        /// Operations requested
        count: usize,
        /// Network limit
        max: usize,
    },

    /// Fee arithmetic overflowed.
    #[error("Fee overflow")]
    FeeOverflow,

    /// Secret seed is not a valid strkey.
    #[error("Invalid signing key")]
    InvalidSigningKey,

    /// Configuration rejected.
    #[error("Invalid executor configuration: {0}")]
    InvalidConfig(String),
}
