//! # Error Types
//!
//! Errors raised while constructing ledger value types.

use thiserror::Error;

/// Errors produced when parsing or combining ledger values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount string is not a valid non-negative decimal with at most 7 places.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Account id is not a valid ed25519 public key strkey.
    #[error("Invalid account id '{0}'")]
    InvalidAccountId(String),

    /// Asset code is empty, too long or not alphanumeric.
    #[error("Invalid asset code '{0}'")]
    InvalidAssetCode(String),

    /// Canonical asset string could not be parsed.
    #[error("Invalid asset '{0}'")]
    InvalidAsset(String),

    /// Memo text exceeds the ledger limit.
    #[error("Memo too long: {len} bytes, max {max}")]
    MemoTooLong { len: usize, max: usize },

    /// Transaction hash is not 32 hex-encoded bytes.
    #[error("Invalid transaction hash '{0}'")]
    InvalidTransactionHash(String),

    /// Arithmetic overflowed the 64-bit stroop range.
    #[error("Amount overflow")]
    AmountOverflow,
}
