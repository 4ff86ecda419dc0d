//! In-memory identity, history and notification collaborators.

use crate::domain::{CollaboratorError, HistoryRecord, IdentityError, Pin, WithdrawalConfirmed};
use crate::ports::{HistoryStore, IdentityProvider, NotificationDispatcher};
use async_trait::async_trait;
use lx_04_executor::SigningKey;
use parking_lot::{Mutex, RwLock};
use shared_types::AccountId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;

// =============================================================================
// IDENTITY
// =============================================================================

/// Fixed user table of (PIN, signing key).
#[derive(Default)]
pub struct StaticIdentityProvider {
    users: RwLock<HashMap<AccountId, (Pin, SigningKey)>>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl StaticIdentityProvider {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    pub fn with_user(self, account: AccountId, pin: &str, key: SigningKey) -> Self {
        self.users.write().insert(account, (Pin::new(pin), key));
        self
    }

    /// Make every call fail with a backend error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `authorize` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authorize(&self, user: &AccountId, pin: &Pin) -> Result<SigningKey, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityError::Backend("key store unavailable".to_string()));
        }
        let users = self.users.read();
        let (expected, key) = users
            .get(user)
            .ok_or_else(|| IdentityError::UnknownUser(user.short()))?;
        if expected.expose() != pin.expose() {
            return Err(IdentityError::InvalidPin);
        }
        Ok(key.clone())
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// History rows kept in a vector.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
    failing: AtomicBool,
}

impl InMemoryHistoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended so far.
    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.lock().clone()
    }

    /// Make appends fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, record: HistoryRecord) -> Result<(), CollaboratorError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollaboratorError("history store unavailable".to_string()));
        }
        self.records.lock().push(record);
        Ok(())
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Records dispatched events.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<WithdrawalConfirmed>>,
    failing: AtomicBool,
    attempts: AtomicUsize,
    notify: Notify,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events delivered so far.
    pub fn events(&self) -> Vec<WithdrawalConfirmed> {
        self.events.lock().clone()
    }

    /// Dispatch attempts, delivered or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Make dispatches fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Wait until at least `count` dispatch attempts have been made.
    pub async fn wait_for_attempts(&self, count: usize) {
        loop {
            let notified = self.notify.notified();
            if self.attempts() >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotifier {
    async fn withdrawal_confirmed(&self, event: WithdrawalConfirmed) -> Result<(), CollaboratorError> {
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(CollaboratorError("notification channel closed".to_string()))
        } else {
            self.events.lock().push(event);
            Ok(())
        };
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
        result
    }
}
