//! # Orchestration Service - Conversions
//!
//! Swap, strict-send and strict-receive share one planner. A conversion to
//! a missing account whose destination asset is XLM converts into the
//! source account first, then funds the new account with the guaranteed
//! amount in the same transaction.

use super::helpers::{can_receive, ensure_covers, ensure_starting_balance};
use super::OrchestrationService;
use crate::algorithms::{
    build_route, exchange_rate, max_source, min_destination, price_impact_percent,
    select_strict_receive, select_strict_send,
};
use crate::domain::{
    ConversionMode, ExecuteConversionCommand, HistoryDetail, OrchestrationError, PathIntent,
    PathQuote, PathRequest, StrictReceiveDetails, StrictReceivePreview, StrictSendDetails,
    StrictSendPreview, SwapDetails, SwapPreview,
};
use lx_04_executor::TransactionOutcome;
use shared_types::{AccountSnapshot, Amount, Memo, Operation};
use tracing::{debug, info, instrument};

/// Fresh account state, chosen quote and the operations to submit.
struct ConversionPlan {
    account: AccountSnapshot,
    quote: PathQuote,
    /// `min_destination` for strict-send and swaps, `max_source` for
    /// strict-receive.
    bound: Amount,
    operations: Vec<Operation>,
    fee: Amount,
}

impl OrchestrationService {
    #[instrument(skip_all, fields(operation = "swap"))]
    pub(crate) async fn preview_swap_inner(
        &self,
        request: PathRequest,
    ) -> Result<SwapPreview, OrchestrationError> {
        let intent = request.parse(ConversionMode::Swap, &self.config.policy)?;
        let plan = self.plan_conversion(&intent).await?;

        let actual_rate = exchange_rate(plan.quote.source_amount, plan.quote.destination_amount);
        let ideal_rate = self.reference_rate(&intent).await?.or(actual_rate);
        let price_impact = match (ideal_rate, actual_rate) {
            (Some(ideal), Some(actual)) => price_impact_percent(ideal, actual),
            _ => 0.0,
        };

        info!(
            source = %intent.source.short(),
            send_asset = %intent.send_asset.code(),
            dest_asset = %intent.dest_asset.code(),
            amount = %intent.amount,
            estimated = %plan.quote.destination_amount,
            minimum = %plan.bound,
            price_impact,
            "[lx-05] Swap previewed"
        );

        Ok(SwapPreview {
            swap_details: SwapDetails {
                route: build_route(&intent.send_asset, &plan.quote.path, &intent.dest_asset),
                send_asset: intent.send_asset,
                send_amount: intent.amount,
                dest_asset: intent.dest_asset,
                estimated_receive: plan.quote.destination_amount,
                minimum_receive: plan.bound,
                slippage_percent: intent.slippage.percent(),
                exchange_rate: actual_rate.unwrap_or(0.0),
                price_impact_percent: price_impact,
                fee: plan.fee,
            },
        })
    }

    #[instrument(skip_all, fields(operation = "strict_send"))]
    pub(crate) async fn preview_strict_send_inner(
        &self,
        request: PathRequest,
    ) -> Result<StrictSendPreview, OrchestrationError> {
        let intent = request.parse(ConversionMode::StrictSend, &self.config.policy)?;
        let plan = self.plan_conversion(&intent).await?;
        info!(
            source = %intent.source.short(),
            destination = %intent.destination.short(),
            amount = %intent.amount,
            minimum = %plan.bound,
            operations = plan.operations.len(),
            "[lx-05] Strict send previewed"
        );

        Ok(StrictSendPreview {
            strict_send_details: StrictSendDetails {
                source: intent.source,
                destination: intent.destination,
                send_asset: intent.send_asset,
                send_amount: intent.amount,
                dest_asset: intent.dest_asset,
                estimated_receive: plan.quote.destination_amount,
                minimum_receive: plan.bound,
                slippage_percent: intent.slippage.percent(),
                path: plan.quote.path,
                fee: plan.fee,
            },
        })
    }

    #[instrument(skip_all, fields(operation = "strict_receive"))]
    pub(crate) async fn preview_strict_receive_inner(
        &self,
        request: PathRequest,
    ) -> Result<StrictReceivePreview, OrchestrationError> {
        let intent = request.parse(ConversionMode::StrictReceive, &self.config.policy)?;
        let plan = self.plan_conversion(&intent).await?;
        info!(
            source = %intent.source.short(),
            destination = %intent.destination.short(),
            amount = %intent.amount,
            maximum = %plan.bound,
            operations = plan.operations.len(),
            "[lx-05] Strict receive previewed"
        );

        Ok(StrictReceivePreview {
            strict_receive_details: StrictReceiveDetails {
                source: intent.source,
                destination: intent.destination,
                send_asset: intent.send_asset,
                estimated_send: plan.quote.source_amount,
                maximum_send: plan.bound,
                dest_asset: intent.dest_asset,
                dest_amount: intent.amount,
                slippage_percent: intent.slippage.percent(),
                path: plan.quote.path,
                fee: plan.fee,
            },
        })
    }

    #[instrument(skip_all, fields(operation = mode.as_str()))]
    pub(crate) async fn execute_conversion_inner(
        &self,
        mode: ConversionMode,
        command: ExecuteConversionCommand,
    ) -> Result<TransactionOutcome, OrchestrationError> {
        let intent = command.request.parse(mode, &self.config.policy)?;
        let key = self.authorize(&intent.source, &command.pin).await?;

        // Quotes are taken again; only the fresh bound goes on the ledger.
        let plan = self.plan_conversion(&intent).await?;
        let detail = history_detail(&intent, &plan);

        let outcome = self
            .submit(plan.account, plan.operations, Memo::None, &key)
            .await;
        self.after_success(&outcome, &intent.source, detail, None)
            .await;
        Ok(outcome)
    }

    async fn plan_conversion(&self, intent: &PathIntent) -> Result<ConversionPlan, OrchestrationError> {
        let account = self.load_source(&intent.source).await?;
        let base_reserve = self.base_reserve().await?;

        let funds_new_account = match intent.mode {
            ConversionMode::Swap => {
                if !can_receive(&account, &intent.dest_asset) {
                    return Err(OrchestrationError::NoTrustline {
                        asset: intent.dest_asset.code().to_string(),
                    });
                }
                false
            }
            ConversionMode::StrictSend | ConversionMode::StrictReceive => {
                match self.load_optional(&intent.destination).await? {
                    Some(destination) => {
                        if !can_receive(&destination, &intent.dest_asset) {
                            return Err(OrchestrationError::DestinationMissingTrustline {
                                asset: intent.dest_asset.code().to_string(),
                            });
                        }
                        false
                    }
                    None if intent.dest_asset.is_native() => true,
                    None => {
                        return Err(OrchestrationError::DestinationNotFound {
                            destination: intent.destination.to_string(),
                        })
                    }
                }
            }
        };

        let quote = self.best_quote(intent).await?;
        let (bound, send_required, delivered) = match intent.mode {
            ConversionMode::Swap | ConversionMode::StrictSend => {
                let floor = min_destination(quote.destination_amount, intent.slippage)?;
                (floor, intent.amount, floor)
            }
            ConversionMode::StrictReceive => {
                let ceiling = max_source(quote.source_amount, intent.slippage)?;
                (ceiling, ceiling, intent.amount)
            }
        };

        let operation_count = if funds_new_account { 2 } else { 1 };
        let fee = self.fee_for(operation_count)?;
        if funds_new_account {
            ensure_starting_balance(delivered, base_reserve)?;
        }
        ensure_covers(&account, &intent.send_asset, base_reserve, send_required, fee)?;

        let path_destination = if funds_new_account {
            intent.source.clone()
        } else {
            intent.destination.clone()
        };
        let mut operations = vec![match intent.mode {
            ConversionMode::Swap | ConversionMode::StrictSend => Operation::PathPaymentStrictSend {
                send_asset: intent.send_asset.clone(),
                send_amount: intent.amount,
                destination: path_destination,
                dest_asset: intent.dest_asset.clone(),
                dest_min: bound,
                path: quote.path.clone(),
            },
            ConversionMode::StrictReceive => Operation::PathPaymentStrictReceive {
                send_asset: intent.send_asset.clone(),
                send_max: bound,
                destination: path_destination,
                dest_asset: intent.dest_asset.clone(),
                dest_amount: intent.amount,
                path: quote.path.clone(),
            },
        }];
        if funds_new_account {
            operations.push(Operation::CreateAccount {
                destination: intent.destination.clone(),
                starting_balance: delivered,
            });
        }

        Ok(ConversionPlan {
            account,
            quote,
            bound,
            operations,
            fee,
        })
    }

    async fn best_quote(&self, intent: &PathIntent) -> Result<PathQuote, OrchestrationError> {
        let policy = self.config.policy.path_selection;
        let quotes = match intent.mode {
            ConversionMode::Swap | ConversionMode::StrictSend => {
                self.paths
                    .strict_send_paths(&intent.send_asset, intent.amount, &intent.dest_asset)
                    .await?
            }
            ConversionMode::StrictReceive => {
                self.paths
                    .strict_receive_paths(&intent.send_asset, &intent.dest_asset, intent.amount)
                    .await?
            }
        };
        debug!(paths = quotes.len(), policy = ?policy, "[lx-05] Paths received");

        let best = match intent.mode {
            ConversionMode::StrictReceive => select_strict_receive(&quotes, policy),
            _ => select_strict_send(&quotes, policy),
        };
        best.cloned().ok_or_else(|| OrchestrationError::NoPath {
            send_asset: intent.send_asset.code().to_string(),
            dest_asset: intent.dest_asset.code().to_string(),
        })
    }

    /// Rate for the reference amount, used as the undisturbed swap rate.
    async fn reference_rate(&self, intent: &PathIntent) -> Result<Option<f64>, OrchestrationError> {
        let reference = self.config.policy.price_impact_reference_amount;
        let quotes = self
            .paths
            .strict_send_paths(&intent.send_asset, reference, &intent.dest_asset)
            .await?;
        Ok(
            select_strict_send(&quotes, self.config.policy.path_selection)
                .and_then(|q| exchange_rate(q.source_amount, q.destination_amount)),
        )
    }
}

fn history_detail(intent: &PathIntent, plan: &ConversionPlan) -> HistoryDetail {
    match intent.mode {
        ConversionMode::Swap => HistoryDetail::Swap {
            send_asset: intent.send_asset.clone(),
            send_amount: intent.amount,
            dest_asset: intent.dest_asset.clone(),
            minimum_receive: plan.bound,
        },
        ConversionMode::StrictSend => HistoryDetail::StrictSend {
            destination: intent.destination.clone(),
            send_asset: intent.send_asset.clone(),
            send_amount: intent.amount,
            dest_asset: intent.dest_asset.clone(),
            minimum_receive: plan.bound,
        },
        ConversionMode::StrictReceive => HistoryDetail::StrictReceive {
            destination: intent.destination.clone(),
            send_asset: intent.send_asset.clone(),
            maximum_send: plan.bound,
            dest_asset: intent.dest_asset.clone(),
            dest_amount: intent.amount,
        },
    }
}
