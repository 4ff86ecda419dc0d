//! Scripted ledger client.
//!
//! Replays queued submit verdicts and status replies in order. An empty
//! submit queue answers `Pending`; an empty status queue answers `NotFound`.

use crate::domain::{SignedEnvelope, SigningKey, SubmitterError, TransactionDraft};
use crate::ports::{SubmitResponse, SubmitStatus, TransactionStatus, TransactionSubmitter};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lx_02_error_classifier::FailureReport;
use parking_lot::Mutex;
use shared_types::TransactionHash;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// One scripted submit verdict.
#[derive(Debug, Clone)]
pub struct SubmitScript {
    /// Verdict.
    pub status: SubmitStatus,
    /// Codes for `Error`.
    pub error: Option<FailureReport>,
}

/// Replays scripted network behaviour.
#[derive(Default)]
pub struct ScriptedSubmitter {
    submits: Mutex<VecDeque<Result<SubmitScript, SubmitterError>>>,
    statuses: Mutex<VecDeque<Result<TransactionStatus, SubmitterError>>>,
    sign_error: Mutex<Option<SubmitterError>>,
    signed: Mutex<Vec<TransactionDraft>>,
    next_hash: AtomicU64,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedSubmitter {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a submit verdict.
    pub fn push_submit(&self, status: SubmitStatus) -> &Self {
        self.submits.lock().push_back(Ok(SubmitScript {
            status,
            error: None,
        }));
        self
    }

    /// Queue an outright rejection carrying `report`.
    pub fn push_rejection(&self, report: FailureReport) -> &Self {
        self.submits.lock().push_back(Ok(SubmitScript {
            status: SubmitStatus::Error,
            error: Some(report),
        }));
        self
    }

    /// Queue a client error on submit.
    pub fn push_submit_error(&self, error: SubmitterError) -> &Self {
        self.submits.lock().push_back(Err(error));
        self
    }

    /// Queue a status reply.
    pub fn push_status(&self, status: TransactionStatus) -> &Self {
        self.statuses.lock().push_back(Ok(status));
        self
    }

    /// Queue `count` `NotFound` replies.
    pub fn push_not_found(&self, count: usize) -> &Self {
        let mut statuses = self.statuses.lock();
        for _ in 0..count {
            statuses.push_back(Ok(TransactionStatus::NotFound));
        }
        drop(statuses);
        self
    }

    /// Queue a client error on status.
    pub fn push_status_error(&self, error: SubmitterError) -> &Self {
        self.statuses.lock().push_back(Err(error));
        self
    }

    /// Make the next `sign` call fail.
    pub fn fail_signing(&self, error: SubmitterError) -> &Self {
        *self.sign_error.lock() = Some(error);
        self
    }

    /// Success reply with small valid payloads.
    pub fn success_status(ledger: u32) -> TransactionStatus {
        TransactionStatus::Success {
            ledger,
            envelope_xdr: Some(STANDARD.encode(b"envelope")),
            result_xdr: Some(STANDARD.encode(b"result")),
            result_meta_xdr: Some(STANDARD.encode(b"meta")),
        }
    }

    /// Drafts signed so far.
    pub fn signed_drafts(&self) -> Vec<TransactionDraft> {
        self.signed.lock().clone()
    }

    /// Number of `submit` calls.
    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Number of `transaction_status` calls.
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSubmitter for ScriptedSubmitter {
    async fn sign(
        &self,
        draft: &TransactionDraft,
        _key: &SigningKey,
    ) -> Result<SignedEnvelope, SubmitterError> {
        if let Some(error) = self.sign_error.lock().take() {
            return Err(error);
        }
        self.signed.lock().push(draft.clone());

        let n = self.next_hash.fetch_add(1, Ordering::SeqCst) + 1;
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        Ok(SignedEnvelope {
            hash: TransactionHash::from_bytes(bytes),
            envelope_xdr: STANDARD.encode(format!("{}:{}", draft.source, draft.sequence)),
        })
    }

    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmitResponse, SubmitterError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.submits.lock().pop_front().unwrap_or(Ok(SubmitScript {
            status: SubmitStatus::Pending,
            error: None,
        }))?;
        Ok(SubmitResponse {
            status: script.status,
            hash: envelope.hash.clone(),
            error: script.error,
            error_result_xdr: None,
        })
    }

    async fn transaction_status(
        &self,
        _hash: &TransactionHash,
    ) -> Result<TransactionStatus, SubmitterError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .pop_front()
            .unwrap_or(Ok(TransactionStatus::NotFound))
    }
}
