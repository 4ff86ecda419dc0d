//! Swap rate and price impact.

use shared_types::Amount;

/// Destination units per source unit. `None` unless both amounts are positive.
pub fn exchange_rate(source: Amount, destination: Amount) -> Option<f64> {
    if !source.is_positive() || !destination.is_positive() {
        return None;
    }
    Some(destination.to_f64() / source.to_f64())
}

/// `max(0, (ideal − actual) / ideal × 100)`.
///
/// A better-than-ideal fill reports zero. A non-positive or non-finite ideal
/// rate reports zero.
pub fn price_impact_percent(ideal_rate: f64, actual_rate: f64) -> f64 {
    if !ideal_rate.is_finite() || ideal_rate <= 0.0 || !actual_rate.is_finite() {
        return 0.0;
    }
    ((ideal_rate - actual_rate) / ideal_rate * 100.0).max(0.0)
}
