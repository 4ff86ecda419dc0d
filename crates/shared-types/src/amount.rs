//! # Ledger Amounts
//!
//! Fixed-point amounts with 7 decimal places, stored as a signed count of
//! stroops (1 unit = 10^7 stroops).
//!
//! The canonical string form trims trailing zeros (`50`, `50.00001`) and is
//! the form bound into confirmation tokens. `to_fixed()` renders the full
//! 7-place form the ledger client expects.

use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places carried by every ledger amount.
pub const DECIMAL_PLACES: usize = 7;

/// Stroops per whole unit.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// A ledger amount in stroops.
///
/// Parsing rejects negative values. Arithmetic may produce a negative value
/// (e.g. the spendable balance of an account below its reserve), which
/// callers treat as "nothing spendable".
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(i64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Largest representable amount (the ledger's default trustline limit).
    pub const MAX: Amount = Amount(i64::MAX);

    /// Create an amount from raw stroops.
    pub const fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// Create an amount from whole units.
    pub fn from_units(units: i64) -> Result<Self, LedgerError> {
        units
            .checked_mul(STROOPS_PER_UNIT)
            .map(Self)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Raw stroop count.
    pub const fn stroops(self) -> i64 {
        self.0
    }

    /// True if strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True if strictly less than zero.
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// True if zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Result<Amount, LedgerError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Checked subtraction. The result may be negative.
    pub fn checked_sub(self, other: Amount) -> Result<Amount, LedgerError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Checked multiplication by an integer factor.
    pub fn checked_mul(self, factor: i64) -> Result<Amount, LedgerError> {
        self.0
            .checked_mul(factor)
            .map(Amount)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Clamp negative values to zero.
    pub fn max_zero(self) -> Amount {
        Amount(self.0.max(0))
    }

    /// Approximate value in whole units. Display and rate math only.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / STROOPS_PER_UNIT as f64
    }

    /// Full 7-place rendering, e.g. `50.0000000`.
    pub fn to_fixed(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u64;
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / unit,
            abs % unit,
            width = DECIMAL_PLACES
        )
    }

    /// Parse a non-negative decimal string with at most 7 fractional digits.
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let invalid = || LedgerError::InvalidAmount(input.to_string());
        let s = input.trim();

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => {
                if f.is_empty() {
                    return Err(invalid());
                }
                (w, f)
            }
            None => (s, ""),
        };

        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
            || frac.len() > DECIMAL_PLACES
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            format!("{:0<width$}", frac, width = DECIMAL_PLACES)
                .parse()
                .map_err(|_| invalid())?
        };

        whole
            .checked_mul(STROOPS_PER_UNIT)
            .and_then(|v| v.checked_add(frac))
            .map(Amount)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u64;
        let whole = abs / unit;
        let frac = abs % unit;

        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:0width$}", frac, width = DECIMAL_PLACES);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}
