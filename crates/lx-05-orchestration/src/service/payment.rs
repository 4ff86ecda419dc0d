//! # Orchestration Service - Plain Payments
//!
//! A payment to a missing account becomes a create-account operation when
//! the asset is native.

use super::helpers::{can_receive, ensure_covers, ensure_starting_balance, total_debit, PaymentNotice};
use super::OrchestrationService;
use crate::domain::{
    ExecutePaymentCommand, HistoryDetail, OrchestrationError, PaymentDetails, PaymentIntent,
    PaymentPreview, PaymentRequest,
};
use lx_03_confirmation::BoundFields;
use lx_04_executor::TransactionOutcome;
use lx_telemetry::redact;
use shared_types::{AccountSnapshot, Amount, Memo, Operation};
use tracing::{info, instrument, warn};

/// Fresh account state and the operation to submit.
struct PaymentPlan {
    account: AccountSnapshot,
    operation: Operation,
    creates_account: bool,
}

impl OrchestrationService {
    #[instrument(skip_all, fields(operation = "payment"))]
    pub(crate) async fn preview_payment_inner(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentPreview, OrchestrationError> {
        let intent = request.parse(&self.config.policy)?;
        let fee = self.fee_for(1)?;
        let plan = self.plan_payment(&intent, fee).await?;
        let total = total_debit(&intent.asset, intent.amount, fee)?;

        let fields = BoundFields::new(
            &intent.source,
            &intent.destination,
            &intent.asset,
            intent.amount,
            total,
        );
        let token = self
            .tokens
            .issue(fields, self.config.confirmation.token_ttl)
            .await;

        info!(
            source = %intent.source.short(),
            destination = %intent.destination.short(),
            asset = %intent.asset.code(),
            amount = %intent.amount,
            creates_account = plan.creates_account,
            token = %token.redacted(),
            "[lx-05] Payment previewed"
        );

        Ok(PaymentPreview {
            payment_details: PaymentDetails {
                source: intent.source,
                destination: intent.destination,
                asset: intent.asset,
                amount: intent.amount,
                fee,
                total_debit: total,
                memo: memo_text(&intent.memo),
                creates_account: plan.creates_account,
            },
            confirmation_token: token,
        })
    }

    #[instrument(skip_all, fields(operation = "payment"))]
    pub(crate) async fn execute_payment_inner(
        &self,
        command: ExecutePaymentCommand,
    ) -> Result<TransactionOutcome, OrchestrationError> {
        let intent = command.request.parse(&self.config.policy)?;
        let key = self.authorize(&intent.source, &command.pin).await?;

        let fee = self.fee_for(1)?;
        let candidate = BoundFields::new(
            &intent.source,
            &intent.destination,
            &intent.asset,
            intent.amount,
            total_debit(&intent.asset, intent.amount, fee)?,
        );
        if !self
            .tokens
            .validate(&command.confirmation_token, &candidate)
            .await
        {
            warn!(
                source = %intent.source.short(),
                token = %redact(&command.confirmation_token),
                "[lx-05] Confirmation token rejected"
            );
            return Err(OrchestrationError::ConfirmationRejected);
        }

        let plan = self.plan_payment(&intent, fee).await?;
        let detail = if plan.creates_account {
            HistoryDetail::AccountFunded {
                destination: intent.destination.clone(),
                starting_balance: intent.amount,
            }
        } else {
            HistoryDetail::Payment {
                destination: intent.destination.clone(),
                asset: intent.asset.clone(),
                amount: intent.amount,
                fee,
                memo: memo_text(&intent.memo),
                withdrawal: intent.withdrawal.clone(),
            }
        };

        let outcome = self
            .submit(plan.account, vec![plan.operation], intent.memo.clone(), &key)
            .await;

        let notice = PaymentNotice {
            destination: intent.destination,
            asset: intent.asset,
            amount: intent.amount,
            withdrawal: intent.withdrawal,
        };
        self.after_success(&outcome, &intent.source, detail, Some(notice))
            .await;
        Ok(outcome)
    }

    /// Pre-flight checks against fresh ledger state.
    async fn plan_payment(
        &self,
        intent: &PaymentIntent,
        fee: Amount,
    ) -> Result<PaymentPlan, OrchestrationError> {
        let account = self.load_source(&intent.source).await?;
        let base_reserve = self.base_reserve().await?;

        match self.load_optional(&intent.destination).await? {
            None if intent.asset.is_native() => {
                ensure_starting_balance(intent.amount, base_reserve)?;
                ensure_covers(&account, &intent.asset, base_reserve, intent.amount, fee)?;
                Ok(PaymentPlan {
                    account,
                    operation: Operation::CreateAccount {
                        destination: intent.destination.clone(),
                        starting_balance: intent.amount,
                    },
                    creates_account: true,
                })
            }
            None => Err(OrchestrationError::DestinationNotFound {
                destination: intent.destination.to_string(),
            }),
            Some(destination) => {
                if !can_receive(&destination, &intent.asset) {
                    return Err(OrchestrationError::DestinationMissingTrustline {
                        asset: intent.asset.code().to_string(),
                    });
                }
                ensure_covers(&account, &intent.asset, base_reserve, intent.amount, fee)?;
                Ok(PaymentPlan {
                    account,
                    operation: Operation::Payment {
                        destination: intent.destination.clone(),
                        asset: intent.asset.clone(),
                        amount: intent.amount,
                    },
                    creates_account: false,
                })
            }
        }
    }
}

pub(crate) fn memo_text(memo: &Memo) -> Option<String> {
    match memo {
        Memo::None => None,
        Memo::Text(text) => Some(text.clone()),
    }
}
