//! # Reserve Arithmetic
//!
//! An account locks `(2 + sub_entry_count) * base_reserve` of the native
//! asset. Credit balances are fully spendable.

use crate::domain::{BalanceBreakdown, ReserveError};
use shared_types::{AccountSnapshot, Amount, Asset};

/// Reserve units every account carries before any sub-entry.
pub const BASE_RESERVE_MULTIPLIER: i64 = 2;

/// Native balance locked by an account with `sub_entry_count` sub-entries.
pub fn minimum_reserve(sub_entry_count: u32, base_reserve: Amount) -> Result<Amount, ReserveError> {
    if base_reserve.is_negative() {
        return Err(ReserveError::NegativeBaseReserve(base_reserve));
    }
    let units = BASE_RESERVE_MULTIPLIER
        .checked_add(i64::from(sub_entry_count))
        .ok_or(ReserveError::Overflow)?;
    Ok(base_reserve.checked_mul(units)?)
}

/// Native balance breakdown after the reserve and `pending_fee`.
pub fn balance_breakdown(
    account: &AccountSnapshot,
    base_reserve: Amount,
    pending_fee: Amount,
) -> Result<BalanceBreakdown, ReserveError> {
    let total = account.native_balance();
    if total.is_negative() {
        return Err(ReserveError::NegativeBalance {
            asset: Asset::Native.code().to_string(),
            balance: total,
        });
    }
    let reserve = minimum_reserve(account.sub_entry_count, base_reserve)?;
    let spendable = total.checked_sub(reserve)?.checked_sub(pending_fee)?;
    Ok(BalanceBreakdown {
        total,
        minimum_reserve: reserve,
        spendable,
    })
}

/// Spendable balance of `asset`.
///
/// Native: `balance - (2 + sub_entries) * base_reserve - pending_fee`, which
/// is negative for an account already below its reserve. Credit: the full
/// balance; an asset without a trustline is an error.
pub fn spendable_balance(
    account: &AccountSnapshot,
    asset: &Asset,
    base_reserve: Amount,
    pending_fee: Amount,
) -> Result<Amount, ReserveError> {
    Ok(breakdown_for(account, asset, base_reserve, pending_fee)?.spendable)
}

/// Pre-flight check that `required` of `asset` can be spent.
///
/// Returns the breakdown on success so callers can quote it.
pub fn ensure_spendable(
    account: &AccountSnapshot,
    asset: &Asset,
    base_reserve: Amount,
    pending_fee: Amount,
    required: Amount,
) -> Result<BalanceBreakdown, ReserveError> {
    let breakdown = breakdown_for(account, asset, base_reserve, pending_fee)?;
    if !breakdown.covers(required) {
        return Err(ReserveError::Insufficient {
            asset: asset.code().to_string(),
            total: breakdown.total,
            minimum_reserve: breakdown.minimum_reserve,
            spendable: breakdown.spendable,
            required,
        });
    }
    Ok(breakdown)
}

fn breakdown_for(
    account: &AccountSnapshot,
    asset: &Asset,
    base_reserve: Amount,
    pending_fee: Amount,
) -> Result<BalanceBreakdown, ReserveError> {
    if asset.is_native() {
        return balance_breakdown(account, base_reserve, pending_fee);
    }
    let balance = account
        .balance_of(asset)
        .ok_or_else(|| ReserveError::NoTrustline {
            asset: asset.code().to_string(),
        })?;
    if balance.is_negative() {
        return Err(ReserveError::NegativeBalance {
            asset: asset.code().to_string(),
            balance,
        });
    }
    Ok(BalanceBreakdown::unreserved(balance))
}
