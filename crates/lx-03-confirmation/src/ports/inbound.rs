//! # Inbound Port

use crate::domain::{BoundFields, ConfirmationToken};
use async_trait::async_trait;
use std::time::Duration;

/// Confirmation token store.
///
/// `validate` fails closed: a missing, expired, consumed or mismatched token
/// yields `false`, never an error. Of any number of concurrent `validate`
/// calls for the same token, at most one returns `true`.
#[async_trait]
pub trait ConfirmationTokenApi: Send + Sync {
    /// Store `fields` under a fresh random token valid for `ttl`.
    async fn issue(&self, fields: BoundFields, ttl: Duration) -> ConfirmationToken;

    /// Check `candidate` against the token's bound fields and consume it.
    async fn validate(&self, token: &str, candidate: &BoundFields) -> bool;

    /// Remove every record past its expiry. Returns the number removed.
    async fn sweep(&self) -> usize;
}
