//! # Signing Key
//!
//! Decrypted ed25519 seed handed over by the identity provider for one
//! execute call. Zeroized on drop and never printed.

use super::errors::ExecutorError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret signing seed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey {
    seed: [u8; 32],
}

impl SigningKey {
    /// Key from raw seed bytes.
    pub fn from_bytes(seed: [u8; 32]) -> Self {
        Self { seed }
    }

    /// Key from an `S...` secret seed strkey.
    pub fn from_secret_seed(secret: &str) -> Result<Self, ExecutorError> {
        let key = stellar_strkey::ed25519::PrivateKey::from_string(secret.trim())
            .map_err(|_| ExecutorError::InvalidSigningKey)?;
        Ok(Self { seed: key.0 })
    }

    /// Seed bytes. Use immediately; do not keep copies.
    pub fn expose(&self) -> &[u8; 32] {
        &self.seed
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(***)")
    }
}
