//! # Inbound Port

use crate::domain::{SigningKey, TransactionOutcome};
use async_trait::async_trait;
use shared_types::{AccountSnapshot, Memo, Operation};

/// Operations to run as one transaction from a freshly loaded account.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Source account, loaded immediately before this call.
    pub account: AccountSnapshot,
    /// Operations, applied in order.
    pub operations: Vec<Operation>,
    /// Memo.
    pub memo: Memo,
}

/// Transaction executor API.
///
/// Always returns an outcome; client errors become `Failed`.
#[async_trait]
pub trait TransactionExecutorApi: Send + Sync {
    /// Build, sign, submit and wait for a terminal outcome.
    async fn execute(&self, request: ExecutionRequest, key: &SigningKey) -> TransactionOutcome;
}
