//! # Orchestrator Configuration
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LX_POLL_INTERVAL` | `executor.poll_interval` (humantime, e.g. `500ms`) |
//! | `LX_MAX_POLL_ATTEMPTS` | `executor.max_poll_attempts` |
//! | `LX_BASE_FEE_STROOPS` | `executor.base_fee_stroops` |
//! | `LX_TX_TIMEOUT_SECS` | `executor.tx_timeout_secs` |
//! | `LX_TOKEN_TTL` | `confirmation.token_ttl` |
//! | `LX_SWEEP_INTERVAL` | `confirmation.sweep_interval` |
//! | `LX_PATH_SELECTION` | `policy.path_selection` (`first_as_best` / `compare_all`) |
//! | `LX_MAX_SLIPPAGE_PERCENT` | `policy.max_slippage_percent` |
//! | `LX_NETWORK_PASSPHRASE` | `network.passphrase` |
//! | `LX_HORIZON_URL` | `network.horizon_url` |

use super::errors::OrchestrationError;
use super::value_objects::BestPathPolicy;
use humantime_serde::re::humantime;
use lx_01_reserve::MinimumSendPolicy;
use lx_03_confirmation::ConfirmationConfig;
use lx_04_executor::ExecutorConfig;
use serde::{Deserialize, Serialize};
use shared_types::Amount;
use std::str::FromStr;
use std::time::Duration;

/// Public test network passphrase.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Business rules applied during static validation and quoting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Per-asset send floors.
    pub minimum_send: MinimumSendPolicy,
    /// Path selection.
    pub path_selection: BestPathPolicy,
    /// Send amount quoted to find the undisturbed swap rate.
    pub price_impact_reference_amount: Amount,
    /// Exclusive slippage ceiling in percent.
    pub max_slippage_percent: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            minimum_send: MinimumSendPolicy::default(),
            path_selection: BestPathPolicy::FirstAsBest,
            price_impact_reference_amount: Amount::from_stroops(10_000_000),
            max_slippage_percent: 100.0,
        }
    }
}

/// Ledger network the client adapter signs for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network passphrase mixed into transaction hashes.
    pub passphrase: String,
    /// Ledger API base URL.
    pub horizon_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            passphrase: TESTNET_PASSPHRASE.to_string(),
            horizon_url: "https://horizon-testnet.stellar.org".to_string(),
        }
    }
}

/// Complete orchestrator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Submission and polling.
    pub executor: ExecutorConfig,
    /// Confirmation tokens.
    pub confirmation: ConfirmationConfig,
    /// Business rules.
    pub policy: PolicyConfig,
    /// Network.
    pub network: NetworkConfig,
}

impl OrchestratorConfig {
    /// Defaults overridden by `LX_*` environment variables.
    pub fn from_env() -> Result<Self, OrchestrationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `LX_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OrchestrationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("LX_POLL_INTERVAL") {
            config.executor.poll_interval = parse_duration("LX_POLL_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("LX_MAX_POLL_ATTEMPTS") {
            config.executor.max_poll_attempts = parse_value("LX_MAX_POLL_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("LX_BASE_FEE_STROOPS") {
            config.executor.base_fee_stroops = parse_value("LX_BASE_FEE_STROOPS", &v)?;
        }
        if let Some(v) = lookup("LX_TX_TIMEOUT_SECS") {
            config.executor.tx_timeout_secs = parse_value("LX_TX_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("LX_TOKEN_TTL") {
            config.confirmation.token_ttl = parse_duration("LX_TOKEN_TTL", &v)?;
        }
        if let Some(v) = lookup("LX_SWEEP_INTERVAL") {
            config.confirmation.sweep_interval = parse_duration("LX_SWEEP_INTERVAL", &v)?;
        }
        if let Some(v) = lookup("LX_PATH_SELECTION") {
            config.policy.path_selection = BestPathPolicy::parse(&v).ok_or_else(|| {
                OrchestrationError::InvalidConfig(format!("LX_PATH_SELECTION: unknown policy '{}'", v))
            })?;
        }
        if let Some(v) = lookup("LX_MAX_SLIPPAGE_PERCENT") {
            config.policy.max_slippage_percent = parse_value("LX_MAX_SLIPPAGE_PERCENT", &v)?;
        }
        if let Some(v) = lookup("LX_NETWORK_PASSPHRASE") {
            config.network.passphrase = v;
        }
        if let Some(v) = lookup("LX_HORIZON_URL") {
            config.network.horizon_url = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot serve requests.
    pub fn validate(&self) -> Result<(), OrchestrationError> {
        self.executor.validate()?;
        if self.confirmation.token_ttl.is_zero() {
            return Err(OrchestrationError::InvalidConfig(
                "token_ttl must be positive".to_string(),
            ));
        }
        if self.confirmation.sweep_interval.is_zero() {
            return Err(OrchestrationError::InvalidConfig(
                "sweep_interval must be positive".to_string(),
            ));
        }
        let max = self.policy.max_slippage_percent;
        if !(max > 0.0 && max <= 100.0) {
            return Err(OrchestrationError::InvalidConfig(format!(
                "max_slippage_percent must be in (0, 100], got {}",
                max
            )));
        }
        if !self.policy.price_impact_reference_amount.is_positive() {
            return Err(OrchestrationError::InvalidConfig(
                "price_impact_reference_amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, OrchestrationError> {
    humantime::parse_duration(value.trim())
        .map_err(|e| OrchestrationError::InvalidConfig(format!("{}: {}", key, e)))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, OrchestrationError> {
    value
        .trim()
        .parse()
        .map_err(|_| OrchestrationError::InvalidConfig(format!("{}: invalid value '{}'", key, value)))
}
