//! # Token Entities

use crate::ports::Timestamp;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount, Asset};
use std::fmt;

/// Fields a token commits to, in canonical string form.
///
/// Built from typed values so `50` and `50.0000000` bind identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundFields {
    /// Source account id.
    pub source: String,
    /// Destination account id.
    pub destination: String,
    /// Canonical asset (`XLM` or `CODE:ISSUER`).
    pub asset: String,
    /// Canonical amount.
    pub amount: String,
    /// Canonical total debit (amount plus fee for native payments).
    pub total_debit: String,
}

impl BoundFields {
    /// Canonicalize typed payment fields.
    pub fn new(
        source: &AccountId,
        destination: &AccountId,
        asset: &Asset,
        amount: Amount,
        total_debit: Amount,
    ) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            asset: asset.canonical(),
            amount: amount.to_string(),
            total_debit: total_debit.to_string(),
        }
    }
}

/// Opaque token handed to the caller.
///
/// `Debug` shows only a prefix; `Display` and serde emit the full value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    /// Wrap a token string received from a caller.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Full token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix safe to log.
    pub fn redacted(&self) -> String {
        lx_telemetry::redact(&self.0)
    }
}

impl fmt::Debug for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfirmationToken({})", self.redacted())
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored token state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Committed fields.
    pub fields: BoundFields,
    /// Issue time (ms).
    pub created_at: Timestamp,
    /// Expiry time (ms), exclusive.
    pub expires_at: Timestamp,
    /// Set by the first successful validation.
    pub consumed: bool,
}

impl TokenRecord {
    /// True once `now` reaches `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Result of checking a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    /// Fields matched; the token is now consumed.
    Accepted,
    /// Unknown token (never issued, or swept).
    Missing,
    /// Past its expiry.
    Expired,
    /// Already used.
    Consumed,
    /// A bound field differs.
    Mismatch,
}

impl TokenCheck {
    /// True only for `Accepted`.
    pub fn is_accepted(self) -> bool {
        matches!(self, TokenCheck::Accepted)
    }

    /// Metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCheck::Accepted => "accepted",
            TokenCheck::Missing => "missing",
            TokenCheck::Expired => "expired",
            TokenCheck::Consumed => "consumed",
            TokenCheck::Mismatch => "mismatch",
        }
    }
}
