//! # Store Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Confirmation token configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Lifetime of an issued token.
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,
    /// Interval between expiry sweeps.
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(5 * 60),
            sweep_interval: Duration::from_secs(60 * 60),
        }
    }
}
