//! # Value Objects
//!
//! Slippage tolerance, PIN material, path quotes and the path selection
//! policy.

use super::errors::OrchestrationError;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, Asset};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Basis points in 100%.
pub const BPS_PER_WHOLE: u32 = 10_000;

/// Absorbs binary representation error, e.g. `0.29 * 100.0 = 28.999999999999996`.
const BPS_EPSILON: f64 = 1e-6;

// =============================================================================
// SLIPPAGE
// =============================================================================

/// Slippage tolerance in basis points (1% = 100 bps).
///
/// Any value in [0%, 100%] constructs; callers reject 100% and above before
/// building a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slippage {
    bps: u32,
}

impl Slippage {
    /// No tolerance.
    pub const ZERO: Slippage = Slippage { bps: 0 };

    /// From a percentage, truncated to whole basis points. Truncation only
    /// ever tightens the tolerance the caller asked for.
    pub fn from_percent(percent: f64) -> Result<Self, OrchestrationError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(OrchestrationError::InvalidInput(format!(
                "Slippage {} is not a percentage",
                percent
            )));
        }
        let bps = (percent * 100.0 + BPS_EPSILON).floor() as u32;
        let ceiling = if percent < 100.0 { BPS_PER_WHOLE - 1 } else { BPS_PER_WHOLE };
        Ok(Self {
            bps: bps.min(ceiling),
        })
    }

    /// From basis points, capped at 100%.
    pub fn from_bps(bps: u32) -> Self {
        Self {
            bps: bps.min(BPS_PER_WHOLE),
        }
    }

    /// Basis points.
    pub fn bps(self) -> u32 {
        self.bps
    }

    /// Percentage.
    pub fn percent(self) -> f64 {
        f64::from(self.bps) / 100.0
    }
}

// =============================================================================
// PIN
// =============================================================================

/// Transaction PIN as typed by the user. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Pin(String);

impl Pin {
    /// Wrap PIN text.
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }

    /// PIN text. Compare and drop; never log.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pin(***)")
    }
}

// =============================================================================
// PATHS
// =============================================================================

/// One conversion path returned by the path finder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuote {
    /// Asset debited from the source.
    pub source_asset: Asset,
    /// Amount debited.
    pub source_amount: Amount,
    /// Asset credited to the destination.
    pub destination_asset: Asset,
    /// Amount credited.
    pub destination_amount: Amount,
    /// Intermediate hops, excluding source and destination.
    pub path: Vec<Asset>,
}

/// How the best path is chosen from the path finder's answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestPathPolicy {
    /// Trust the path finder's ordering and take the first path.
    #[default]
    FirstAsBest,
    /// Compare every path: most received for strict-send, least sent for
    /// strict-receive. Ties keep the earlier path.
    CompareAll,
}

impl BestPathPolicy {
    /// Parse `first_as_best` / `compare_all`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "first_as_best" | "first" => Some(BestPathPolicy::FirstAsBest),
            "compare_all" => Some(BestPathPolicy::CompareAll),
            _ => None,
        }
    }
}
