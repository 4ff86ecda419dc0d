//! # Domain Errors
//!
//! `OrchestrationError` covers everything rejected before the executor runs.
//! Ledger outcomes (`Failed`, `Timeout`) are not errors and never pass
//! through here.

use super::entities::ResponseStatus;
use lx_01_reserve::ReserveError;
use lx_04_executor::ExecutorError;
use shared_types::{Amount, LedgerError};
use thiserror::Error;

/// Shown for infrastructure faults; the raw error is logged only.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong on our side. Please try again later.";

/// Errors raised by the account loader and path finder ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerClientError {
    /// The account does not exist on the ledger.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Transport or server failure.
    #[error("Ledger network error: {0}")]
    Network(String),
}

/// Errors raised by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// PIN does not match.
    #[error("Invalid PIN")]
    InvalidPin,

    /// No signing material on record for the user.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Key store unavailable or decryption failed.
    #[error("Identity backend error: {0}")]
    Backend(String),
}

/// Errors raised by history and notification collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

/// Orchestration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrchestrationError {
    // =========================================================================
    // VALIDATION
    // =========================================================================
    /// Malformed account id, amount, asset, memo or slippage.
    #[error("{0}")]
    InvalidInput(String),

    /// Amount is zero.
    #[error("Amount must be greater than zero")]
    AmountNotPositive,

    /// Amount below the per-asset floor.
    #[error("The minimum amount for {asset} is {minimum} (requested {amount})")]
    BelowMinimum {
        /// Asset code
        asset: String,
        /// Requested amount
        amount: Amount,
        /// Floor
        minimum: Amount,
    },

    /// Slippage outside the accepted range.
    #[error("Slippage must be at least 0% and below {max}%")]
    SlippageOutOfRange {
        /// Exclusive upper bound
        max: f64,
    },

    /// Source and destination asset are the same in a conversion.
    #[error("Choose two different assets to convert between")]
    SameAsset,

    /// PIN mismatch or unknown user.
    #[error("Incorrect PIN")]
    Unauthorized,

    /// Token missing, expired, consumed or bound to other fields.
    #[error("This confirmation is no longer valid. Please review the payment again.")]
    ConfirmationRejected,

    // =========================================================================
    // PRE-FLIGHT
    // =========================================================================
    /// Spendable balance does not cover the transaction.
    #[error(
        "Insufficient {asset} balance: total {total}, reserved {minimum_reserve}, spendable {spendable}, required {required}"
    )]
    InsufficientFunds {
        /// Asset code
        asset: String,
        /// Total balance
        total: Amount,
        /// Reserve locked by the account
        minimum_reserve: Amount,
        /// Available to spend
        spendable: Amount,
        /// Needed
        required: Amount,
    },

    /// Source account cannot hold the asset.
    #[error("Your account has no trustline for {asset}. Add the asset first.")]
    NoTrustline {
        /// Asset code
        asset: String,
    },

    /// Destination exists but cannot hold the asset.
    #[error("The recipient has no trustline for {asset}")]
    DestinationMissingTrustline {
        /// Asset code
        asset: String,
    },

    /// Destination does not exist and cannot be created by this operation.
    #[error("The recipient account {destination} does not exist. Only XLM can fund a new account.")]
    DestinationNotFound {
        /// Destination account id
        destination: String,
    },

    /// Funding requested for an account that already exists.
    #[error("The account {destination} already exists. Send a payment instead.")]
    DestinationExists {
        /// Destination account id
        destination: String,
    },

    /// New account would start below the network minimum.
    #[error("A new account needs at least {minimum} XLM (requested {amount})")]
    StartingBalanceTooLow {
        /// Requested starting balance
        amount: Amount,
        /// Network minimum
        minimum: Amount,
    },

    /// Trustline addition for an asset already held.
    #[error("A trustline for {asset} already exists")]
    TrustlineExists {
        /// Asset code
        asset: String,
    },

    /// Trustline removal with a remaining balance.
    #[error("Your {asset} balance must be zero before removing it (current balance {balance})")]
    TrustlineNotEmpty {
        /// Asset code
        asset: String,
        /// Remaining balance
        balance: Amount,
    },

    /// Trustline operation on the native asset.
    #[error("XLM does not need a trustline")]
    NativeTrustline,

    /// Path finder returned nothing.
    #[error("No conversion path found from {send_asset} to {dest_asset}")]
    NoPath {
        /// Source asset code
        send_asset: String,
        /// Destination asset code
        dest_asset: String,
    },

    // =========================================================================
    // INFRASTRUCTURE
    // =========================================================================
    /// Collaborator or arithmetic fault.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    /// Configuration rejected at startup.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OrchestrationError {
    /// Response status for this error.
    pub fn status(&self) -> ResponseStatus {
        match self {
            OrchestrationError::Unauthorized => ResponseStatus::Unauthorized,
            OrchestrationError::Infrastructure(_) | OrchestrationError::InvalidConfig(_) => {
                ResponseStatus::InternalServerError
            }
            _ => ResponseStatus::BadRequest,
        }
    }

    /// Message safe to return to the caller.
    pub fn user_message(&self) -> String {
        match self {
            OrchestrationError::Infrastructure(_) | OrchestrationError::InvalidConfig(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<LedgerError> for OrchestrationError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::AmountOverflow => OrchestrationError::Infrastructure(error.to_string()),
            other => OrchestrationError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ReserveError> for OrchestrationError {
    fn from(error: ReserveError) -> Self {
        match error {
            ReserveError::Insufficient {
                asset,
                total,
                minimum_reserve,
                spendable,
                required,
            } => OrchestrationError::InsufficientFunds {
                asset,
                total,
                minimum_reserve,
                spendable,
                required,
            },
            ReserveError::BelowMinimum {
                asset,
                amount,
                minimum,
            } => OrchestrationError::BelowMinimum {
                asset,
                amount,
                minimum,
            },
            ReserveError::NoTrustline { asset } => OrchestrationError::NoTrustline { asset },
            ReserveError::UnknownAsset(code) => {
                OrchestrationError::InvalidInput(format!("Unknown asset '{}'", code))
            }
            other => OrchestrationError::Infrastructure(other.to_string()),
        }
    }
}

impl From<LedgerClientError> for OrchestrationError {
    fn from(error: LedgerClientError) -> Self {
        OrchestrationError::Infrastructure(error.to_string())
    }
}

impl From<IdentityError> for OrchestrationError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::InvalidPin | IdentityError::UnknownUser(_) => {
                OrchestrationError::Unauthorized
            }
            IdentityError::Backend(msg) => OrchestrationError::Infrastructure(msg),
        }
    }
}

impl From<ExecutorError> for OrchestrationError {
    fn from(error: ExecutorError) -> Self {
        OrchestrationError::Infrastructure(error.to_string())
    }
}
