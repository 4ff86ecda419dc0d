//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Accounts**: `AccountSnapshot`, `BalanceLine`
//! - **Operations**: `Operation`, `OperationKind`, `Memo`
//! - **Transactions**: `TransactionHash`

use crate::amount::Amount;
use crate::asset::{AccountId, Asset};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// One balance held by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    /// Asset held.
    pub asset: Asset,
    /// Current balance.
    pub balance: Amount,
    /// Trustline limit (`Amount::MAX` for native).
    pub limit: Amount,
}

impl BalanceLine {
    /// Native balance line.
    pub fn native(balance: Amount) -> Self {
        Self {
            asset: Asset::Native,
            balance,
            limit: Amount::MAX,
        }
    }

    /// Trustline with the default (maximum) limit.
    pub fn trustline(asset: Asset, balance: Amount) -> Self {
        Self {
            asset,
            balance,
            limit: Amount::MAX,
        }
    }
}

/// Point-in-time read of an on-ledger account.
///
/// Always loaded fresh before a transaction is built; the sequence number
/// goes stale as soon as the account submits anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Account id.
    pub account_id: AccountId,
    /// Current sequence number.
    pub sequence: i64,
    /// Balances, native first by convention.
    pub balances: Vec<BalanceLine>,
    /// Open sub-entries (trustlines, offers, signers, data entries).
    pub sub_entry_count: u32,
}

impl AccountSnapshot {
    /// Balance line for `asset`, if the account holds it.
    pub fn balance_line(&self, asset: &Asset) -> Option<&BalanceLine> {
        self.balances.iter().find(|line| &line.asset == asset)
    }

    /// Balance of `asset`, if the account holds it.
    pub fn balance_of(&self, asset: &Asset) -> Option<Amount> {
        self.balance_line(asset).map(|line| line.balance)
    }

    /// Native balance (zero if the line is missing).
    pub fn native_balance(&self) -> Amount {
        self.balance_of(&Asset::Native).unwrap_or(Amount::ZERO)
    }

    /// True if the account can hold `asset`. Always true for native.
    pub fn has_trustline(&self, asset: &Asset) -> bool {
        asset.is_native() || self.balance_line(asset).is_some()
    }

    /// Sequence number the next transaction must carry.
    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}

// =============================================================================
// CLUSTER B: OPERATIONS
// =============================================================================

/// Maximum memo text length in bytes.
pub const MAX_MEMO_TEXT_BYTES: usize = 28;

/// Transaction memo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memo {
    /// No memo.
    #[default]
    None,
    /// UTF-8 text memo.
    Text(String),
}

impl Memo {
    /// Text memo, rejected if over the byte limit.
    pub fn text(text: impl Into<String>) -> Result<Self, LedgerError> {
        let text = text.into();
        if text.len() > MAX_MEMO_TEXT_BYTES {
            return Err(LedgerError::MemoTooLong {
                len: text.len(),
                max: MAX_MEMO_TEXT_BYTES,
            });
        }
        Ok(Memo::Text(text))
    }

    /// Build from an optional caller string; empty means no memo.
    pub fn from_optional(text: Option<&str>) -> Result<Self, LedgerError> {
        match text {
            None | Some("") => Ok(Memo::None),
            Some(t) => Memo::text(t),
        }
    }
}

/// A single ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Direct transfer of one asset.
    Payment {
        destination: AccountId,
        asset: Asset,
        amount: Amount,
    },
    /// Conversion with a fixed source amount and a destination floor.
    PathPaymentStrictSend {
        send_asset: Asset,
        send_amount: Amount,
        destination: AccountId,
        dest_asset: Asset,
        dest_min: Amount,
        path: Vec<Asset>,
    },
    /// Conversion with a fixed destination amount and a source ceiling.
    PathPaymentStrictReceive {
        send_asset: Asset,
        send_max: Amount,
        destination: AccountId,
        dest_asset: Asset,
        dest_amount: Amount,
        path: Vec<Asset>,
    },
    /// Create, update or remove a trustline. `None` is the maximum limit;
    /// `Some(Amount::ZERO)` removes the line.
    ChangeTrust { asset: Asset, limit: Option<Amount> },
    /// Create and fund a new account.
    CreateAccount {
        destination: AccountId,
        starting_balance: Amount,
    },
}

impl Operation {
    /// Kind tag of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Payment { .. } => OperationKind::Payment,
            Operation::PathPaymentStrictSend { .. } => OperationKind::PathPaymentStrictSend,
            Operation::PathPaymentStrictReceive { .. } => OperationKind::PathPaymentStrictReceive,
            Operation::ChangeTrust { .. } => OperationKind::ChangeTrust,
            Operation::CreateAccount { .. } => OperationKind::CreateAccount,
        }
    }

    /// Asset debited from the operation's source.
    pub fn sent_asset(&self) -> &Asset {
        match self {
            Operation::Payment { asset, .. } => asset,
            Operation::PathPaymentStrictSend { send_asset, .. } => send_asset,
            Operation::PathPaymentStrictReceive { send_asset, .. } => send_asset,
            Operation::ChangeTrust { asset, .. } => asset,
            Operation::CreateAccount { .. } => &Asset::Native,
        }
    }

    /// Asset credited to the operation's destination.
    pub fn received_asset(&self) -> &Asset {
        match self {
            Operation::Payment { asset, .. } => asset,
            Operation::PathPaymentStrictSend { dest_asset, .. } => dest_asset,
            Operation::PathPaymentStrictReceive { dest_asset, .. } => dest_asset,
            Operation::ChangeTrust { asset, .. } => asset,
            Operation::CreateAccount { .. } => &Asset::Native,
        }
    }
}

/// Operation type as reported by the ledger network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Payment,
    PathPaymentStrictSend,
    PathPaymentStrictReceive,
    ChangeTrust,
    CreateAccount,
    /// Any operation type this engine does not build.
    Other(String),
}

impl OperationKind {
    /// Network type name, e.g. `path_payment_strict_send`.
    pub fn as_str(&self) -> &str {
        match self {
            OperationKind::Payment => "payment",
            OperationKind::PathPaymentStrictSend => "path_payment_strict_send",
            OperationKind::PathPaymentStrictReceive => "path_payment_strict_receive",
            OperationKind::ChangeTrust => "change_trust",
            OperationKind::CreateAccount => "create_account",
            OperationKind::Other(name) => name,
        }
    }

    /// Parse a network type name. Unknown names map to `Other`.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "payment" => OperationKind::Payment,
            "path_payment_strict_send" => OperationKind::PathPaymentStrictSend,
            "path_payment_strict_receive" => OperationKind::PathPaymentStrictReceive,
            "change_trust" => OperationKind::ChangeTrust,
            "create_account" => OperationKind::CreateAccount,
            other => OperationKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLUSTER C: TRANSACTIONS
// =============================================================================

/// Hex-encoded 32-byte transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionHash(String);

impl TransactionHash {
    /// Encode raw hash bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse a 64-character hex string (normalized to lowercase).
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let s = input.trim().to_ascii_lowercase();
        match hex::decode(&s) {
            Ok(bytes) if bytes.len() == 32 => Ok(Self(s)),
            _ => Err(LedgerError::InvalidTransactionHash(input.to_string())),
        }
    }

    /// Hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TransactionHash {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TransactionHash::parse(&value)
    }
}

impl From<TransactionHash> for String {
    fn from(value: TransactionHash) -> Self {
        value.0
    }
}
