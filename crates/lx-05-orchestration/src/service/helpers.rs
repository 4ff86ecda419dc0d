//! # Orchestration Service - Helpers
//!
//! Shared steps of every flow and the outcome-to-envelope mapping.

use super::OrchestrationService;
use crate::domain::{
    ApiResponse, ExecutionReceipt, FiatWithdrawal, HistoryDetail, HistoryRecord,
    LedgerClientError, OrchestrationError, Pin, ResponseStatus, WithdrawalConfirmed,
};
use lx_01_reserve::{ensure_spendable, BalanceBreakdown, BASE_RESERVE_MULTIPLIER};
use lx_04_executor::{ExecutionRequest, SigningKey, TransactionOutcome};
use lx_telemetry::{metric_inc, ORCHESTRATION_REQUESTS};
use shared_types::{AccountId, AccountSnapshot, Amount, Asset, Memo, Operation};
use tracing::{error, info, warn};

/// Payment details carried into the post-success notification.
pub(crate) struct PaymentNotice {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: Amount,
    pub withdrawal: Option<FiatWithdrawal>,
}

impl OrchestrationService {
    /// Fee for a transaction of `operation_count` operations.
    pub(crate) fn fee_for(&self, operation_count: usize) -> Result<Amount, OrchestrationError> {
        Ok(self.config.executor.fee_for(operation_count)?)
    }

    pub(crate) async fn authorize(
        &self,
        user: &AccountId,
        pin: &Pin,
    ) -> Result<SigningKey, OrchestrationError> {
        self.identity.authorize(user, pin).await.map_err(|e| {
            warn!(user = %user.short(), error = %e, "[lx-05] Authorization failed");
            OrchestrationError::from(e)
        })
    }

    /// Fresh snapshot of the paying account.
    pub(crate) async fn load_source(
        &self,
        account: &AccountId,
    ) -> Result<AccountSnapshot, OrchestrationError> {
        match self.accounts.load_account(account).await {
            Ok(snapshot) => Ok(snapshot),
            Err(LedgerClientError::AccountNotFound(_)) => Err(OrchestrationError::InvalidInput(
                "Your account does not exist on the network yet. Fund it with XLM first."
                    .to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Snapshot of an account that may not exist yet.
    pub(crate) async fn load_optional(
        &self,
        account: &AccountId,
    ) -> Result<Option<AccountSnapshot>, OrchestrationError> {
        match self.accounts.load_account(account).await {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(LedgerClientError::AccountNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) async fn base_reserve(&self) -> Result<Amount, OrchestrationError> {
        Ok(self.accounts.base_reserve().await?)
    }

    /// Run one transaction through the executor.
    pub(crate) async fn submit(
        &self,
        account: AccountSnapshot,
        operations: Vec<Operation>,
        memo: Memo,
        key: &SigningKey,
    ) -> TransactionOutcome {
        self.executor
            .execute(
                ExecutionRequest {
                    account,
                    operations,
                    memo,
                },
                key,
            )
            .await
    }

    /// History append and, for payments, a detached notification.
    ///
    /// Neither can change the outcome: the money has already moved.
    pub(crate) async fn after_success(
        &self,
        outcome: &TransactionOutcome,
        user: &AccountId,
        detail: HistoryDetail,
        notice: Option<PaymentNotice>,
    ) {
        let TransactionOutcome::Success { hash, .. } = outcome else {
            return;
        };

        let record = HistoryRecord {
            user: user.clone(),
            detail,
            tx_hash: hash.clone(),
        };
        if let Err(e) = self.history.append(record).await {
            error!(tx_hash = %hash, error = %e, "[lx-05] History append failed");
        }

        if let Some(notice) = notice {
            let event = WithdrawalConfirmed {
                user: user.clone(),
                destination: notice.destination,
                asset: notice.asset,
                amount: notice.amount,
                tx_hash: hash.clone(),
                withdrawal: notice.withdrawal,
            };
            let notifier = self.notifier.clone();
            tokio::spawn(async move {
                let tx_hash = event.tx_hash.clone();
                if let Err(e) = notifier.withdrawal_confirmed(event).await {
                    warn!(tx_hash = %tx_hash, error = %e, "[lx-05] Notification dispatch failed");
                }
            });
        }
    }
}

/// Spendable check for sending `amount` of `asset` plus `fee` in XLM.
///
/// Native sends need `amount + fee` above the reserve. Credit sends need
/// `amount` of the asset and `fee` above the native reserve.
pub(crate) fn ensure_covers(
    account: &AccountSnapshot,
    asset: &Asset,
    base_reserve: Amount,
    amount: Amount,
    fee: Amount,
) -> Result<BalanceBreakdown, OrchestrationError> {
    if asset.is_native() {
        let required = amount.checked_add(fee)?;
        return Ok(ensure_spendable(account, asset, base_reserve, Amount::ZERO, required)?);
    }
    let breakdown = ensure_spendable(account, asset, base_reserve, Amount::ZERO, amount)?;
    ensure_spendable(account, &Asset::Native, base_reserve, Amount::ZERO, fee)?;
    Ok(breakdown)
}

/// New accounts start with at least two base reserves.
pub(crate) fn ensure_starting_balance(
    amount: Amount,
    base_reserve: Amount,
) -> Result<(), OrchestrationError> {
    let minimum = base_reserve.checked_mul(BASE_RESERVE_MULTIPLIER)?;
    if amount < minimum {
        return Err(OrchestrationError::StartingBalanceTooLow { amount, minimum });
    }
    Ok(())
}

/// True if `account` can be credited with `asset`.
pub(crate) fn can_receive(account: &AccountSnapshot, asset: &Asset) -> bool {
    account.has_trustline(asset) || asset.issuer() == Some(&account.account_id)
}

/// Amount plus fee for native assets, the amount alone for credit assets.
pub(crate) fn total_debit(
    asset: &Asset,
    amount: Amount,
    fee: Amount,
) -> Result<Amount, OrchestrationError> {
    if asset.is_native() {
        Ok(amount.checked_add(fee)?)
    } else {
        Ok(amount)
    }
}

fn record_request(operation: &str, phase: &str, status: ResponseStatus) {
    metric_inc!(ORCHESTRATION_REQUESTS, &[operation, phase, status.as_str()]);
}

fn log_rejection(operation: &str, phase: &str, error: &OrchestrationError) {
    match error.status() {
        ResponseStatus::InternalServerError => {
            error!(operation, phase, error = %error, "[lx-05] Request failed")
        }
        _ => warn!(operation, phase, error = %error, "[lx-05] Request rejected"),
    }
}

/// Envelope for a preview result.
pub(crate) fn respond_preview<T>(
    operation: &'static str,
    result: Result<T, OrchestrationError>,
) -> ApiResponse<T> {
    let response = match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            log_rejection(operation, "preview", &e);
            ApiResponse::from_error(&e)
        }
    };
    record_request(operation, "preview", response.status);
    response
}

/// Envelope for an execute result.
pub(crate) fn respond_execution(
    operation: &'static str,
    result: Result<TransactionOutcome, OrchestrationError>,
) -> ApiResponse<ExecutionReceipt> {
    let response = match result {
        Ok(outcome) => outcome_response(operation, outcome),
        Err(e) => {
            log_rejection(operation, "execute", &e);
            ApiResponse::from_error(&e)
        }
    };
    record_request(operation, "execute", response.status);
    response
}

fn outcome_response(operation: &str, outcome: TransactionOutcome) -> ApiResponse<ExecutionReceipt> {
    match outcome {
        TransactionOutcome::Success { hash, ledger, .. } => {
            info!(operation, tx_hash = %hash, ledger = ?ledger, "[lx-05] Transaction confirmed");
            ApiResponse::ok_with_message(
                ExecutionReceipt { hash: Some(hash) },
                "Transaction successful",
            )
        }
        TransactionOutcome::Failed {
            code,
            user_message,
            details,
        } => {
            warn!(
                operation,
                code = %code,
                tx_hash = %details.hash.as_ref().map(|h| h.as_str()).unwrap_or("-"),
                retryable = details.retryable,
                raw_error = details.raw_error.as_deref().unwrap_or(""),
                "[lx-05] Transaction failed"
            );
            ApiResponse::failure(
                ResponseStatus::BadRequest,
                user_message,
                Some(ExecutionReceipt::default()),
            )
        }
        TransactionOutcome::Timeout { hash, attempts, .. } => {
            warn!(operation, tx_hash = %hash, attempts, "[lx-05] Transaction not confirmed in time");
            let message = format!(
                "Transaction {} was submitted but is not confirmed yet. Check its status before trying again.",
                hash
            );
            ApiResponse::accepted(ExecutionReceipt { hash: Some(hash) }, message)
        }
    }
}
