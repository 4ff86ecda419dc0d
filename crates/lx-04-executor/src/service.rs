//! # Executor Service
//!
//! Drives one submission through Built → Signed → Submitted → poll →
//! terminal outcome. Polling sleeps on the tokio timer and never blocks a
//! worker thread. Nothing is resubmitted here.

use crate::algorithms::decode_xdr;
use crate::domain::{
    ExecutorConfig, ExecutorError, FailureDetails, LastKnownStatus, SigningKey, SubmitterError,
    Transaction, TransactionOutcome,
};
use crate::ports::{
    ExecutionRequest, SubmitStatus, TransactionExecutorApi, TransactionStatus,
    TransactionSubmitter,
};
use async_trait::async_trait;
use lx_02_error_classifier::{
    classify_with_asset, concerns_sent_asset, heuristic_message, FailureReport,
};
use lx_telemetry::{
    time_histogram, CONFIRMATION_LATENCY, POLL_ATTEMPTS, TRANSACTIONS_SUBMITTED,
    TRANSACTION_OUTCOMES,
};
use shared_types::{Asset, Operation, TransactionHash};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Used when a client error matches no heuristic.
const GENERIC_CLIENT_ERROR: &str =
    "The transaction could not be completed. Please try again later.";

/// Transaction executor.
pub struct TransactionExecutor {
    submitter: Arc<dyn TransactionSubmitter>,
    config: ExecutorConfig,
}

impl TransactionExecutor {
    /// Executor over `submitter`.
    pub fn new(submitter: Arc<dyn TransactionSubmitter>, config: ExecutorConfig) -> Self {
        Self { submitter, config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    #[instrument(skip_all, fields(source = %request.account.account_id.short()))]
    async fn run(&self, request: ExecutionRequest, key: &SigningKey) -> TransactionOutcome {
        let operations = request.operations.clone();

        let built = match Transaction::build(
            &request.account,
            request.operations,
            request.memo,
            &self.config,
            now_unix_secs(),
        ) {
            Ok(built) => built,
            Err(e) => return build_failure(e),
        };

        let envelope = match self.submitter.sign(built.draft(), key).await {
            Ok(envelope) => envelope,
            Err(e) => return client_failure(e, None),
        };
        let signed = built.into_signed(envelope);

        TRANSACTIONS_SUBMITTED.inc();
        let _latency = time_histogram!(CONFIRMATION_LATENCY);

        let response = match self.submitter.submit(signed.envelope()).await {
            Ok(response) => response,
            Err(e) => return client_failure(e, Some(signed.envelope().hash.clone())),
        };
        let submitted = signed.into_submitted();
        let hash = submitted.hash().clone();

        info!(
            tx_hash = %hash,
            status = ?response.status,
            sequence = submitted.draft().sequence,
            "[lx-04] Transaction submitted"
        );

        match response.status {
            SubmitStatus::Pending | SubmitStatus::Duplicate => {
                self.poll(hash, &operations).await
            }
            SubmitStatus::TryAgainLater => {
                let report = FailureReport::transaction("try_again_later");
                failed_from_report(&report, &operations, Some(hash), None)
            }
            SubmitStatus::Error => {
                let report = response
                    .error
                    .unwrap_or_else(|| FailureReport::transaction("tx_failed"));
                failed_from_report(
                    &report,
                    &operations,
                    Some(hash),
                    response.error_result_xdr.as_deref(),
                )
            }
        }
    }

    async fn poll(&self, hash: TransactionHash, operations: &[Operation]) -> TransactionOutcome {
        let max_attempts = self.config.max_poll_attempts;

        for attempt in 1..=max_attempts {
            POLL_ATTEMPTS.inc();
            match self.submitter.transaction_status(&hash).await {
                Ok(TransactionStatus::NotFound) => {
                    debug!(tx_hash = %hash, attempt, max_attempts, "[lx-04] Not found yet");
                    if attempt < max_attempts {
                        tokio::time::sleep(self.config.poll_interval).await;
                    }
                }
                Ok(TransactionStatus::Success {
                    ledger,
                    envelope_xdr,
                    result_xdr: _,
                    result_meta_xdr,
                }) => {
                    info!(tx_hash = %hash, ledger, attempt, "[lx-04] Transaction confirmed");
                    return TransactionOutcome::Success {
                        hash,
                        ledger: Some(ledger),
                        result_meta: decode_xdr(result_meta_xdr.as_deref()),
                        envelope: decode_xdr(envelope_xdr.as_deref()),
                    };
                }
                Ok(TransactionStatus::Failed { report, result_xdr }) => {
                    return failed_from_report(
                        &report,
                        operations,
                        Some(hash),
                        result_xdr.as_deref(),
                    );
                }
                Err(e) => return client_failure(e, Some(hash)),
            }
        }

        warn!(
            tx_hash = %hash,
            attempts = max_attempts,
            "[lx-04] Poll budget exhausted; transaction may still land"
        );
        TransactionOutcome::Timeout {
            hash,
            last_known_status: LastKnownStatus::NotFound,
            attempts: max_attempts,
        }
    }
}

#[async_trait]
impl TransactionExecutorApi for TransactionExecutor {
    async fn execute(&self, request: ExecutionRequest, key: &SigningKey) -> TransactionOutcome {
        let outcome = self.run(request, key).await;
        TRANSACTION_OUTCOMES.with_label_values(&[outcome.label()]).inc();
        outcome
    }
}

/// Asset to name when the failing operation's detail carries none: the
/// failing operation's sent or received asset, depending on the code.
fn context_asset<'a>(report: &FailureReport, operations: &'a [Operation]) -> Option<&'a Asset> {
    let index = report
        .operations
        .iter()
        .position(|op| !op.succeeded())
        .unwrap_or(0);
    let operation = operations.get(index).or_else(|| operations.first())?;
    let code = report
        .failing_operation()
        .map(|op| op.code.as_str())
        .unwrap_or(report.transaction_code.as_str());
    if concerns_sent_asset(code) {
        Some(operation.sent_asset())
    } else {
        Some(operation.received_asset())
    }
}

fn failed_from_report(
    report: &FailureReport,
    operations: &[Operation],
    hash: Option<TransactionHash>,
    result_xdr: Option<&str>,
) -> TransactionOutcome {
    let classification = classify_with_asset(report, context_asset(report, operations));
    warn!(
        tx_hash = %hash.as_ref().map(|h| h.as_str()).unwrap_or("-"),
        transaction_code = %classification.transaction_code,
        operation_code = classification.operation_code.as_deref().unwrap_or(""),
        retryable = classification.retryable,
        "[lx-04] Transaction failed"
    );
    let operation_codes = report.operations.iter().map(|op| op.code.clone()).collect();
    TransactionOutcome::from_classification(
        classification,
        hash,
        operation_codes,
        decode_xdr(result_xdr),
    )
}

fn client_failure(error: SubmitterError, hash: Option<TransactionHash>) -> TransactionOutcome {
    let raw = error.to_string();
    warn!(error = %raw, "[lx-04] Ledger client error");
    TransactionOutcome::Failed {
        code: error.code().to_string(),
        user_message: heuristic_message(&raw)
            .unwrap_or(GENERIC_CLIENT_ERROR)
            .to_string(),
        details: FailureDetails {
            hash,
            raw_error: Some(raw),
            ..FailureDetails::default()
        },
    }
}

fn build_failure(error: ExecutorError) -> TransactionOutcome {
    warn!(error = %error, "[lx-04] Transaction could not be built");
    TransactionOutcome::Failed {
        code: "build_error".to_string(),
        user_message: error.to_string(),
        details: FailureDetails {
            raw_error: Some(error.to_string()),
            ..FailureDetails::default()
        },
    }
}

fn now_unix_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
