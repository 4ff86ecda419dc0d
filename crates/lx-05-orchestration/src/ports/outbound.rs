//! # Outbound Ports
//!
//! Collaborators consulted by the orchestrators. Submission goes through
//! `lx_04_executor::TransactionSubmitter`, not through these ports.

use crate::domain::{
    CollaboratorError, HistoryRecord, IdentityError, LedgerClientError, PathQuote, Pin,
    WithdrawalConfirmed,
};
use async_trait::async_trait;
use lx_04_executor::SigningKey;
use shared_types::{AccountId, AccountSnapshot, Amount, Asset};

/// Ledger account reads.
#[async_trait]
pub trait AccountLoader: Send + Sync {
    /// Current snapshot. `AccountNotFound` if the account does not exist.
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot, LedgerClientError>;

    /// Current base reserve.
    async fn base_reserve(&self) -> Result<Amount, LedgerClientError>;
}

/// Conversion path queries. Paths are returned best first.
#[async_trait]
pub trait PathFinder: Send + Sync {
    /// Paths delivering `dest_asset` for exactly `send_amount` of `send_asset`.
    async fn strict_send_paths(
        &self,
        send_asset: &Asset,
        send_amount: Amount,
        dest_asset: &Asset,
    ) -> Result<Vec<PathQuote>, LedgerClientError>;

    /// Paths delivering exactly `dest_amount` of `dest_asset` for `send_asset`.
    async fn strict_receive_paths(
        &self,
        send_asset: &Asset,
        dest_asset: &Asset,
        dest_amount: Amount,
    ) -> Result<Vec<PathQuote>, LedgerClientError>;
}

/// Session and key custody.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Check `pin` for `user` and hand back the decrypted signing key.
    async fn authorize(&self, user: &AccountId, pin: &Pin) -> Result<SigningKey, IdentityError>;
}

/// Transaction history persistence.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one confirmed transaction.
    async fn append(&self, record: HistoryRecord) -> Result<(), CollaboratorError>;
}

/// User notifications. Failures are logged by the caller and never change
/// a payment outcome.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Announce a confirmed payment or withdrawal.
    async fn withdrawal_confirmed(&self, event: WithdrawalConfirmed) -> Result<(), CollaboratorError>;
}
