//! # Type-State Transaction Lifecycle
//!
//! Each lifecycle stage is a distinct type. Transitions consume `self`, so a
//! draft cannot be submitted unsigned and a signed envelope cannot be
//! submitted twice through the same value.
//!
//! ```text
//! [Built] ──sign──→ [Signed] ──submit──→ [Submitted]
//! ```

use super::config::ExecutorConfig;
use super::errors::ExecutorError;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, AccountSnapshot, Amount, Memo, Operation, TransactionHash};

/// Network limit on operations per transaction.
pub const MAX_OPERATIONS: usize = 100;

// =============================================================================
// STATES
// =============================================================================

/// State: draft assembled, not yet signed.
#[derive(Debug, Clone, Copy)]
pub struct Built;

/// State: envelope signed, not yet sent.
#[derive(Debug, Clone)]
pub struct Signed {
    envelope: SignedEnvelope,
}

/// State: envelope handed to the network.
#[derive(Debug, Clone)]
pub struct Submitted {
    envelope: SignedEnvelope,
}

// =============================================================================
// DRAFT AND ENVELOPE
// =============================================================================

/// Validity window in Unix seconds. `max_time == 0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    /// Earliest ledger close time.
    pub min_time: u64,
    /// Latest ledger close time.
    pub max_time: u64,
}

/// Unsigned transaction contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Source account.
    pub source: AccountId,
    /// Sequence number this transaction consumes.
    pub sequence: i64,
    /// Total fee.
    pub fee: Amount,
    /// Operations, applied in order.
    pub operations: Vec<Operation>,
    /// Memo.
    pub memo: Memo,
    /// Validity window.
    pub time_bounds: TimeBounds,
}

/// Signed envelope produced by the network client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Network hash of the transaction.
    pub hash: TransactionHash,
    /// Base64 envelope XDR.
    pub envelope_xdr: String,
}

// =============================================================================
// TYPE-STATE TRANSACTION
// =============================================================================

/// A transaction with its lifecycle stage in the type.
#[derive(Debug)]
pub struct Transaction<S> {
    draft: TransactionDraft,
    state: S,
}

impl Transaction<Built> {
    /// Build a draft against a freshly loaded account.
    pub fn build(
        account: &AccountSnapshot,
        operations: Vec<Operation>,
        memo: Memo,
        config: &ExecutorConfig,
        now_secs: u64,
    ) -> Result<Self, ExecutorError> {
        if operations.is_empty() {
            return Err(ExecutorError::NoOperations);
        }
        if operations.len() > MAX_OPERATIONS {
            return Err(ExecutorError::TooManyOperations {
                count: operations.len(),
                max: MAX_OPERATIONS,
            });
        }
        let fee = config.fee_for(operations.len())?;

        Ok(Self {
            draft: TransactionDraft {
                source: account.account_id.clone(),
                sequence: account.next_sequence(),
                fee,
                operations,
                memo,
                time_bounds: TimeBounds {
                    min_time: 0,
                    max_time: now_secs.saturating_add(config.tx_timeout_secs),
                },
            },
            state: Built,
        })
    }

    /// Attach the signed envelope. Consumes the draft.
    pub fn into_signed(self, envelope: SignedEnvelope) -> Transaction<Signed> {
        Transaction {
            draft: self.draft,
            state: Signed { envelope },
        }
    }
}

impl Transaction<Signed> {
    /// Envelope to hand to the network.
    pub fn envelope(&self) -> &SignedEnvelope {
        &self.state.envelope
    }

    /// Record that the envelope was sent. Consumes the signed value.
    pub fn into_submitted(self) -> Transaction<Submitted> {
        Transaction {
            draft: self.draft,
            state: Submitted {
                envelope: self.state.envelope,
            },
        }
    }
}

impl Transaction<Submitted> {
    /// Hash to poll.
    pub fn hash(&self) -> &TransactionHash {
        &self.state.envelope.hash
    }
}

impl<S> Transaction<S> {
    /// Draft contents.
    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }
}
