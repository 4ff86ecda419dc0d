//! # Value Objects

use super::errors::ReserveError;
use serde::{Deserialize, Serialize};
use shared_types::Amount;
use std::collections::HashMap;

/// Breakdown of an account's native balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    /// Total balance held.
    pub total: Amount,
    /// Reserve locked by the account and its sub-entries.
    pub minimum_reserve: Amount,
    /// `total - minimum_reserve - pending_fee`. May be negative.
    pub spendable: Amount,
}

impl BalanceBreakdown {
    /// Breakdown of a credit asset: nothing is reserved.
    pub fn unreserved(balance: Amount) -> Self {
        Self {
            total: balance,
            minimum_reserve: Amount::ZERO,
            spendable: balance,
        }
    }

    /// True if `required` can be spent.
    pub fn covers(&self, required: Amount) -> bool {
        self.spendable >= required
    }
}

/// Per-asset minimum send amounts.
///
/// Codes without an override use `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumSendPolicy {
    /// Floor for assets without an override.
    pub default: Amount,
    /// Floors keyed by asset display code.
    pub overrides: HashMap<String, Amount>,
}

impl Default for MinimumSendPolicy {
    fn default() -> Self {
        Self {
            default: Amount::from_stroops(1),
            overrides: HashMap::new(),
        }
    }
}

impl MinimumSendPolicy {
    /// Add an override, builder style.
    pub fn with_override(mut self, asset_code: &str, minimum: Amount) -> Self {
        self.overrides.insert(asset_code.to_string(), minimum);
        self
    }

    /// Floor below which a send of `asset_code` is rejected.
    pub fn minimum_send_amount(&self, asset_code: &str) -> Result<Amount, ReserveError> {
        if asset_code.trim().is_empty() {
            return Err(ReserveError::UnknownAsset(asset_code.to_string()));
        }
        Ok(self
            .overrides
            .get(asset_code)
            .copied()
            .unwrap_or(self.default))
    }

    /// Reject `amount` if it is below the floor for `asset_code`.
    pub fn check(&self, asset_code: &str, amount: Amount) -> Result<(), ReserveError> {
        let minimum = self.minimum_send_amount(asset_code)?;
        if amount < minimum {
            return Err(ReserveError::BelowMinimum {
                asset: asset_code.to_string(),
                amount,
                minimum,
            });
        }
        Ok(())
    }
}
