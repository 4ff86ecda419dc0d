//! # Executor Configuration

use super::errors::ExecutorError;
use serde::{Deserialize, Serialize};
use shared_types::Amount;
use std::time::Duration;

/// Status polling and fee configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Wait between status polls.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Polls before giving up with a timeout outcome.
    pub max_poll_attempts: u32,
    /// Fee per operation, in stroops.
    pub base_fee_stroops: i64,
    /// Upper time bound placed on each transaction, in seconds from build.
    pub tx_timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 30,
            base_fee_stroops: 100,
            tx_timeout_secs: 180,
        }
    }
}

impl ExecutorConfig {
    /// Config with near-zero waits, for tests.
    pub fn fast() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            ..Self::default()
        }
    }

    /// Total fee for a transaction with `operation_count` operations.
    pub fn fee_for(&self, operation_count: usize) -> Result<Amount, ExecutorError> {
        let count = i64::try_from(operation_count).map_err(|_| ExecutorError::FeeOverflow)?;
        self.base_fee_stroops
            .checked_mul(count)
            .map(Amount::from_stroops)
            .ok_or(ExecutorError::FeeOverflow)
    }

    /// Reject configurations that cannot produce an outcome.
    pub fn validate(&self) -> Result<(), ExecutorError> {
        if self.max_poll_attempts == 0 {
            return Err(ExecutorError::InvalidConfig(
                "max_poll_attempts must be at least 1".to_string(),
            ));
        }
        if self.base_fee_stroops <= 0 {
            return Err(ExecutorError::InvalidConfig(
                "base_fee_stroops must be positive".to_string(),
            ));
        }
        if self.tx_timeout_secs == 0 {
            return Err(ExecutorError::InvalidConfig(
                "tx_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
