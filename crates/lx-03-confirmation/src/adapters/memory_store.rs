//! In-memory confirmation token store.
//!
//! Records live in a `DashMap`. `validate` holds the entry's shard lock
//! across the check and the consume flag write, so two racing validators
//! cannot both observe `consumed == false`.

use crate::domain::{BoundFields, ConfirmationToken, TokenCheck, TokenRecord};
use crate::ports::{ConfirmationTokenApi, SystemTimeSource, TimeSource};
use async_trait::async_trait;
use dashmap::DashMap;
use lx_telemetry::{TOKENS_ISSUED, TOKENS_SWEPT, TOKEN_VALIDATIONS};
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Random bytes per token.
const TOKEN_BYTES: usize = 32;

/// Process-lifetime token store.
pub struct InMemoryTokenStore {
    records: DashMap<String, TokenRecord>,
    clock: Arc<dyn TimeSource>,
}

impl InMemoryTokenStore {
    /// Store driven by `clock`.
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            records: DashMap::new(),
            clock,
        }
    }

    /// Store driven by the system clock.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemTimeSource))
    }

    /// Issue a token.
    pub fn issue_token(&self, fields: BoundFields, ttl: Duration) -> ConfirmationToken {
        let token = generate_token();
        let now = self.clock.now();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let record = TokenRecord {
            fields,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            consumed: false,
        };
        self.records.insert(token.as_str().to_string(), record);
        TOKENS_ISSUED.inc();

        debug!(
            token = %token.redacted(),
            ttl_ms = ttl_ms,
            "[lx-03] Issued confirmation token"
        );
        token
    }

    /// Check a token and report why it was rejected.
    pub fn check(&self, token: &str, candidate: &BoundFields) -> TokenCheck {
        let now = self.clock.now();
        let result = match self.records.get_mut(token) {
            None => TokenCheck::Missing,
            Some(mut record) => {
                if record.consumed {
                    TokenCheck::Consumed
                } else if record.is_expired(now) {
                    TokenCheck::Expired
                } else if record.fields != *candidate {
                    TokenCheck::Mismatch
                } else {
                    record.consumed = true;
                    TokenCheck::Accepted
                }
            }
        };

        TOKEN_VALIDATIONS.with_label_values(&[result.as_str()]).inc();
        if !result.is_accepted() {
            warn!(
                token = %lx_telemetry::redact(token),
                reason = result.as_str(),
                "[lx-03] Confirmation token rejected"
            );
        }
        result
    }

    /// Remove expired records regardless of consumption.
    pub fn remove_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.records.retain(|_, record| {
            if record.is_expired(now) {
                removed += 1;
                false
            } else {
                true
            }
        });
        if removed > 0 {
            TOKENS_SWEPT.inc_by(removed as f64);
        }
        removed
    }

    /// Number of stored records, consumed or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ConfirmationTokenApi for InMemoryTokenStore {
    async fn issue(&self, fields: BoundFields, ttl: Duration) -> ConfirmationToken {
        self.issue_token(fields, ttl)
    }

    async fn validate(&self, token: &str, candidate: &BoundFields) -> bool {
        self.check(token, candidate).is_accepted()
    }

    async fn sweep(&self) -> usize {
        self.remove_expired()
    }
}

fn generate_token() -> ConfirmationToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    ConfirmationToken::new(hex::encode(bytes))
}
