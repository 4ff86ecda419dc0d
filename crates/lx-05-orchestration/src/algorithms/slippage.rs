//! Slippage-adjusted bounds.
//!
//! Integer math on stroops in `i128`, truncating toward zero:
//!
//! - `min_destination = quote × (100 − s) / 100`
//! - `max_source = quote × 100 / (100 − s)`

use crate::domain::{OrchestrationError, Slippage, BPS_PER_WHOLE};
use shared_types::Amount;

/// Lowest acceptable destination amount for a strict-send quote.
pub fn min_destination(quote: Amount, slippage: Slippage) -> Result<Amount, OrchestrationError> {
    let kept = i128::from(BPS_PER_WHOLE - slippage.bps());
    let scaled = i128::from(quote.stroops()) * kept / i128::from(BPS_PER_WHOLE);
    to_amount(scaled)
}

/// Highest acceptable source amount for a strict-receive quote.
pub fn max_source(quote: Amount, slippage: Slippage) -> Result<Amount, OrchestrationError> {
    let kept = i128::from(BPS_PER_WHOLE - slippage.bps());
    if kept == 0 {
        return Err(OrchestrationError::SlippageOutOfRange { max: 100.0 });
    }
    let scaled = i128::from(quote.stroops()) * i128::from(BPS_PER_WHOLE) / kept;
    to_amount(scaled)
}

fn to_amount(stroops: i128) -> Result<Amount, OrchestrationError> {
    i64::try_from(stroops)
        .map(Amount::from_stroops)
        .map_err(|_| OrchestrationError::Infrastructure("slippage bound overflow".to_string()))
}
