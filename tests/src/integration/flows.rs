//! # Preview → Execute Journeys
//!
//! ## Subsystems exercised
//!
//! 1. **Reserve (01)**: spendable balance quoted in pre-flight rejections
//! 2. **Classifier (02)**: ledger result codes turned into user messages
//! 3. **Confirmation (03)**: token binding, expiry and sweeping
//! 4. **Executor (04)**: submit, poll, outcome
//! 5. **Orchestration (05)**: the response envelope the caller sees

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use lx_01_reserve::spendable_balance;
    use lx_02_error_classifier::{FailureDetail, FailureReport, OperationFailure};
    use lx_04_executor::{ScriptedSubmitter, TransactionStatus};
    use lx_05_orchestration::{
        ExecuteConversionCommand, ExecutePaymentCommand, FiatWithdrawal, OrchestrationApi,
        OrchestratorConfig, PathQuote, PathRequest, PaymentRequest, Pin, ResponseStatus,
    };
    use shared_types::{Amount, Asset, BalanceLine, Operation, OperationKind};
    use std::collections::HashMap;
    use std::time::Duration;

    fn pay(asset: &str, amount: &str) -> PaymentRequest {
        PaymentRequest {
            source: sender().to_string(),
            destination: receiver().to_string(),
            asset: asset.to_string(),
            amount: amount.to_string(),
            memo: None,
            withdrawal: None,
        }
    }

    fn confirm(request: PaymentRequest, token: &str) -> ExecutePaymentCommand {
        ExecutePaymentCommand {
            request,
            pin: Pin::new(PIN),
            confirmation_token: token.to_string(),
        }
    }

    async fn token_for(world: &World, request: PaymentRequest) -> String {
        let preview = world.service.preview_payment(request).await;
        assert_eq!(preview.status, ResponseStatus::Ok, "{:?}", preview.message);
        preview.data.unwrap().confirmation_token.as_str().to_string()
    }

    // =========================================================================
    // RESERVE (01) → ORCHESTRATION (05)
    // =========================================================================

    #[tokio::test]
    async fn test_spendable_balance_respects_reserve() {
        let world = world(3);
        let account = world.ledger.account(&sender()).unwrap();
        let spendable = spendable_balance(
            &account,
            &Asset::Native,
            Amount::from_stroops(BASE_RESERVE_STROOPS),
            Amount::ZERO,
        )
        .unwrap();
        assert_eq!(spendable.to_string(), "8.5");

        let rejected = world.service.preview_payment(pay("XLM", "9")).await;
        assert_eq!(rejected.status, ResponseStatus::BadRequest);
        assert!(rejected.message.unwrap().contains("spendable 8.5"));

        // 8.49999 + 0.00001 fee is exactly the spendable balance
        let accepted = world.service.preview_payment(pay("XLM", "8.49999")).await;
        assert_eq!(accepted.status, ResponseStatus::Ok);
        assert_eq!(
            accepted.data.unwrap().payment_details.total_debit.to_string(),
            "8.5"
        );
    }

    // =========================================================================
    // CONFIRMATION (03) → ORCHESTRATION (05)
    // =========================================================================

    #[tokio::test]
    async fn test_tampered_amount_is_rejected_without_network() {
        let world = world(3);
        let token = token_for(&world, pay("XLM", "5")).await;
        let loads = world.ledger.account_loads();

        let response = world
            .service
            .execute_payment(confirm(pay("XLM", "6"), &token))
            .await;
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "BAD_REQUEST");
        assert_eq!(json["success"], false);
        assert_eq!(world.ledger.account_loads(), loads);
        assert_eq!(world.submitter.submit_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_swept() {
        let world = world(3);
        let token = token_for(&world, pay("XLM", "5")).await;
        assert_eq!(world.tokens.len(), 1);

        let ttl = world.service.config().confirmation.token_ttl;
        world.clock.advance(ttl.as_millis() as u64 + 1);
        assert_eq!(world.tokens.remove_expired(), 1);
        assert!(world.tokens.is_empty());

        let response = world
            .service
            .execute_payment(confirm(pay("XLM", "5"), &token))
            .await;
        assert_eq!(response.status, ResponseStatus::BadRequest);
    }

    // =========================================================================
    // EXECUTOR (04) + CLASSIFIER (02) → ORCHESTRATION (05)
    // =========================================================================

    #[tokio::test]
    async fn test_unconfirmed_and_failed_are_distinguishable() {
        let pending = world(2);
        let token = token_for(&pending, pay("XLM", "1")).await;
        let response = pending
            .service
            .execute_payment(confirm(pay("XLM", "1"), &token))
            .await;
        let accepted = serde_json::to_value(&response).unwrap();
        assert_eq!(accepted["status"], "ACCEPTED");
        assert_eq!(accepted["success"], false);
        assert!(accepted["data"]["hash"].is_string());

        let failing = world(2);
        failing
            .submitter
            .push_rejection(FailureReport::transaction("tx_insufficient_balance"));
        let token = token_for(&failing, pay("XLM", "1")).await;
        let response = failing
            .service
            .execute_payment(confirm(pay("XLM", "1"), &token))
            .await;
        let failed = serde_json::to_value(&response).unwrap();
        assert_eq!(failed["status"], "BAD_REQUEST");
        assert_eq!(failed["success"], false);
        assert_eq!(failed["data"], serde_json::json!({}));
        assert_ne!(accepted["message"], failed["message"]);
    }

    #[tokio::test]
    async fn test_ledger_code_names_the_asset() {
        let world = world(3);
        world.submitter.push_status(TransactionStatus::Failed {
            report: FailureReport::operation(
                OperationFailure::new(OperationKind::Payment, "op_no_trust")
                    .with_detail(FailureDetail::NoTrust { asset: usdc() }),
            ),
            result_xdr: None,
        });

        let token = token_for(&world, pay(&usdc_code(), "5")).await;
        let response = world
            .service
            .execute_payment(confirm(pay(&usdc_code(), "5"), &token))
            .await;
        assert_eq!(response.status, ResponseStatus::BadRequest);
        assert!(response.message.unwrap().contains("USDC"));
        assert!(world.history.records().is_empty());
    }

    #[tokio::test]
    async fn test_withdrawal_notification_carries_payout_details() {
        let world = world(3);
        let request = PaymentRequest {
            withdrawal: Some(FiatWithdrawal {
                bank_account_number: "9876543210".to_string(),
                account_name: "R. Ceiver".to_string(),
                institution: "Anchor Bank".to_string(),
            }),
            ..pay(&usdc_code(), "12")
        };
        let token = token_for(&world, request.clone()).await;

        world
            .submitter
            .push_status(ScriptedSubmitter::success_status(901));
        let response = world.service.execute_payment(confirm(request, &token)).await;
        assert_eq!(response.status, ResponseStatus::Ok);

        tokio::time::timeout(Duration::from_secs(1), world.notifier.wait_for_attempts(1))
            .await
            .unwrap();
        let event = world.notifier.events().remove(0);
        assert_eq!(event.amount, units(12));
        assert_eq!(
            event.withdrawal.unwrap().bank_account_number,
            "9876543210"
        );
        assert_eq!(Some(event.tx_hash), response.data.unwrap().hash);
    }

    // =========================================================================
    // CONVERSIONS
    // =========================================================================

    #[tokio::test]
    async fn test_strict_receive_caps_source_at_two_percent() {
        let world = world(3);
        world.ledger.insert_account(snapshot(
            sender(),
            units(10),
            vec![BalanceLine::trustline(usdc(), units(500))],
        ));
        world.ledger.set_fixed_quotes(
            &usdc(),
            &Asset::Native,
            vec![PathQuote {
                source_asset: usdc(),
                source_amount: units(100),
                destination_asset: Asset::Native,
                destination_amount: units(100),
                path: vec![],
            }],
        );
        let request = PathRequest {
            source: sender().to_string(),
            destination: Some(receiver().to_string()),
            send_asset: usdc_code(),
            dest_asset: "XLM".to_string(),
            amount: "100".to_string(),
            slippage_percent: 2.0,
        };

        let preview = world.service.preview_strict_receive(request.clone()).await;
        let details = preview.data.unwrap().strict_receive_details;
        assert_eq!(details.maximum_send.to_string(), "102.0408163");

        world
            .submitter
            .push_status(ScriptedSubmitter::success_status(902));
        let response = world
            .service
            .execute_strict_receive(ExecuteConversionCommand {
                request,
                pin: Pin::new(PIN),
            })
            .await;
        assert_eq!(response.status, ResponseStatus::Ok);
        match &world.submitter.signed_drafts()[0].operations[0] {
            Operation::PathPaymentStrictReceive {
                send_max,
                dest_amount,
                destination,
                ..
            } => {
                assert_eq!(send_max.to_string(), "102.0408163");
                assert_eq!(*dest_amount, units(100));
                assert_eq!(*destination, receiver());
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    #[tokio::test]
    async fn test_environment_config_sets_fee() {
        let env: HashMap<&str, &str> = [
            ("LX_BASE_FEE_STROOPS", "250"),
            ("LX_POLL_INTERVAL", "1ms"),
            ("LX_MAX_POLL_ATTEMPTS", "2"),
        ]
        .into_iter()
        .collect();
        let config =
            OrchestratorConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
        let world = world_with(config);

        let preview = world.service.preview_payment(pay("XLM", "1")).await;
        let details = preview.data.unwrap().payment_details;
        assert_eq!(details.fee, Amount::from_stroops(250));
        assert_eq!(details.total_debit.to_string(), "1.000025");
    }
}
