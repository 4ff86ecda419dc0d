//! # Domain Errors

use shared_types::{Amount, LedgerError};
use thiserror::Error;

/// Reserve and balance errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReserveError {
    /// Snapshot carries a negative balance.
    #[error("Negative balance for {asset}: {balance}")]
    NegativeBalance {
        /// Asset display code
        asset: String,
        /// Offending balance
        balance: Amount,
    },

    /// Base reserve from the network is negative.
    #[error("Negative base reserve: {0}")]
    NegativeBaseReserve(Amount),

    /// Account has no trustline for the asset.
    #[error("No trustline for {asset}")]
    NoTrustline {
        /// Asset display code
        asset: String,
    },

    /// Asset code is empty.
    #[error("Unknown asset '{0}'")]
    UnknownAsset(String),

    /// Amount below the per-asset floor.
    #[error("Amount {amount} {asset} is below the minimum of {minimum}")]
    BelowMinimum {
        /// Asset display code
        asset: String,
        /// Requested amount
        amount: Amount,
        /// Floor for this asset
        minimum: Amount,
    },

    /// Spendable balance does not cover the required amount.
    #[error("Insufficient {asset}: spendable {spendable}, required {required}")]
    Insufficient {
        /// Asset display code
        asset: String,
        /// Total balance held
        total: Amount,
        /// Reserve locked by the account (zero for credit assets)
        minimum_reserve: Amount,
        /// Balance available to spend
        spendable: Amount,
        /// Amount the operation needs
        required: Amount,
    },

    /// Stroop arithmetic overflowed.
    #[error("Reserve arithmetic overflow")]
    Overflow,
}

impl From<LedgerError> for ReserveError {
    fn from(_: LedgerError) -> Self {
        ReserveError::Overflow
    }
}
