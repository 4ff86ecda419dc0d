//! # Accounts and Assets
//!
//! `AccountId` wraps an ed25519 public-key strkey (`G...`). `Asset` is either
//! the native asset or a credit asset identified by (code, issuer).

use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use stellar_strkey::ed25519::PublicKey;

/// Display code of the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

/// Maximum length of a credit asset code.
pub const MAX_ASSET_CODE_LEN: usize = 12;

/// A validated ledger account id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Parse and checksum-verify a `G...` strkey.
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let s = input.trim();
        PublicKey::from_string(s).map_err(|_| LedgerError::InvalidAccountId(s.to_string()))?;
        Ok(Self(s.to_string()))
    }

    /// Encode raw public-key bytes as an account id.
    pub fn from_public_key(bytes: [u8; 32]) -> Self {
        Self(PublicKey(bytes).to_string())
    }

    /// The strkey string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines, e.g. `GAAA..AWHF`.
    pub fn short(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 {
            return s.clone();
        }
        format!("{}..{}", &s[..4], &s[s.len() - 4..])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountId::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

/// A ledger asset.
///
/// Equality is by (code, issuer); the native asset has no issuer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Asset {
    /// The ledger's native asset.
    Native,
    /// An issued asset.
    Credit {
        /// Asset code (1-12 alphanumeric characters).
        code: String,
        /// Issuing account.
        issuer: AccountId,
    },
}

impl Asset {
    /// The native asset.
    pub fn native() -> Self {
        Asset::Native
    }

    /// A credit asset with a validated code.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self, LedgerError> {
        let code = code.trim();
        if code.is_empty()
            || code.len() > MAX_ASSET_CODE_LEN
            || !code.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(LedgerError::InvalidAssetCode(code.to_string()));
        }
        Ok(Asset::Credit {
            code: code.to_string(),
            issuer,
        })
    }

    /// Parse the canonical form: `XLM` / `native`, or `CODE:ISSUER`.
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let s = input.trim();
        if s == NATIVE_ASSET_CODE || s.eq_ignore_ascii_case("native") {
            return Ok(Asset::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| LedgerError::InvalidAsset(s.to_string()))?;
        Asset::credit(code, AccountId::parse(issuer)?)
    }

    /// True for the native asset.
    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    /// Display code (`XLM` for native).
    pub fn code(&self) -> &str {
        match self {
            Asset::Native => NATIVE_ASSET_CODE,
            Asset::Credit { code, .. } => code,
        }
    }

    /// Issuer, if any.
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Asset::Native => None,
            Asset::Credit { issuer, .. } => Some(issuer),
        }
    }

    /// Canonical string form.
    pub fn canonical(&self) -> String {
        match self {
            Asset::Native => NATIVE_ASSET_CODE.to_string(),
            Asset::Credit { code, issuer } => format!("{}:{}", code, issuer),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl TryFrom<String> for Asset {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Asset::parse(&value)
    }
}

impl From<Asset> for String {
    fn from(value: Asset) -> Self {
        value.canonical()
    }
}
