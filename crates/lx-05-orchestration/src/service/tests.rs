//! Service tests over the in-memory adapters.

use super::*;
use crate::adapters::{InMemoryHistoryStore, InMemoryLedger, RecordingNotifier, StaticIdentityProvider};
use crate::domain::{
    HistoryDetail, Pin, PathQuote, ResponseStatus, INTERNAL_ERROR_MESSAGE,
};
use lx_02_error_classifier::{FailureReport, OperationFailure};
use lx_03_confirmation::{InMemoryTokenStore, MockTimeSource};
use lx_04_executor::{ExecutorConfig, ScriptedSubmitter, SigningKey, TransactionStatus};
use shared_types::{AccountId, AccountSnapshot, Amount, Asset, BalanceLine, Operation, OperationKind};
use std::time::Duration;

const PIN: &str = "1234";

struct Harness {
    service: OrchestrationService,
    ledger: Arc<InMemoryLedger>,
    submitter: Arc<ScriptedSubmitter>,
    clock: Arc<MockTimeSource>,
    identity: Arc<StaticIdentityProvider>,
    history: Arc<InMemoryHistoryStore>,
    notifier: Arc<RecordingNotifier>,
}

fn id(byte: u8) -> AccountId {
    AccountId::from_public_key([byte; 32])
}

fn alice() -> AccountId {
    id(1)
}

fn bob() -> AccountId {
    id(2)
}

/// Never created in the ledger.
fn carol() -> AccountId {
    id(3)
}

/// 10 XLM and one trustline.
fn dave() -> AccountId {
    id(4)
}

/// XLM only.
fn erin() -> AccountId {
    id(5)
}

fn issuer() -> AccountId {
    id(9)
}

fn usdc() -> Asset {
    Asset::credit("USDC", issuer()).unwrap()
}

fn eurt() -> Asset {
    Asset::credit("EURT", issuer()).unwrap()
}

fn usdc_str() -> String {
    format!("USDC:{}", issuer())
}

fn units(n: i64) -> Amount {
    Amount::from_units(n).unwrap()
}

fn amount(s: &str) -> Amount {
    Amount::parse(s).unwrap()
}

fn snapshot(account: AccountId, native: Amount, lines: Vec<BalanceLine>) -> AccountSnapshot {
    let mut balances = vec![BalanceLine::native(native)];
    let sub_entry_count = lines.len() as u32;
    balances.extend(lines);
    AccountSnapshot {
        account_id: account,
        sequence: 100,
        balances,
        sub_entry_count,
    }
}

fn harness() -> Harness {
    let ledger = Arc::new(InMemoryLedger::new(Amount::from_stroops(5_000_000)));
    ledger
        .insert_account(snapshot(
            alice(),
            units(1000),
            vec![BalanceLine::trustline(usdc(), units(100))],
        ))
        .insert_account(snapshot(
            bob(),
            units(5),
            vec![BalanceLine::trustline(usdc(), Amount::ZERO)],
        ))
        .insert_account(snapshot(
            dave(),
            units(10),
            vec![BalanceLine::trustline(usdc(), units(3))],
        ))
        .insert_account(snapshot(erin(), units(5), vec![]));

    let submitter = Arc::new(ScriptedSubmitter::new());
    let clock = Arc::new(MockTimeSource::new(1_000_000));
    let tokens = Arc::new(InMemoryTokenStore::new(clock.clone()));
    let identity = Arc::new(
        StaticIdentityProvider::new()
            .with_user(alice(), PIN, SigningKey::from_bytes([11u8; 32]))
            .with_user(bob(), PIN, SigningKey::from_bytes([12u8; 32]))
            .with_user(dave(), PIN, SigningKey::from_bytes([14u8; 32]))
            .with_user(erin(), PIN, SigningKey::from_bytes([15u8; 32])),
    );
    let history = Arc::new(InMemoryHistoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let config = OrchestratorConfig {
        executor: ExecutorConfig {
            max_poll_attempts: 3,
            ..ExecutorConfig::fast()
        },
        ..OrchestratorConfig::default()
    };
    let service = OrchestrationService::new(
        OrchestrationDependencies {
            accounts: ledger.clone(),
            paths: ledger.clone(),
            submitter: submitter.clone(),
            tokens,
            identity: identity.clone(),
            history: history.clone(),
            notifier: notifier.clone(),
        },
        config,
    )
    .unwrap();

    Harness {
        service,
        ledger,
        submitter,
        clock,
        identity,
        history,
        notifier,
    }
}

fn payment(source: AccountId, destination: AccountId, asset: &str, amount: &str) -> PaymentRequest {
    PaymentRequest {
        source: source.to_string(),
        destination: destination.to_string(),
        asset: asset.to_string(),
        amount: amount.to_string(),
        memo: None,
        withdrawal: None,
    }
}

fn execute(request: PaymentRequest, token: &str) -> ExecutePaymentCommand {
    ExecutePaymentCommand {
        request,
        pin: Pin::new(PIN),
        confirmation_token: token.to_string(),
    }
}

fn conversion(
    destination: Option<AccountId>,
    send_asset: String,
    dest_asset: String,
    amount: &str,
    slippage_percent: f64,
) -> PathRequest {
    PathRequest {
        source: alice().to_string(),
        destination: destination.map(|d| d.to_string()),
        send_asset,
        dest_asset,
        amount: amount.to_string(),
        slippage_percent,
    }
}

fn trustline(account: AccountId, asset: String) -> TrustlineCommand {
    TrustlineCommand {
        account: account.to_string(),
        asset,
        pin: Pin::new(PIN),
    }
}

async fn preview_token(h: &Harness, request: PaymentRequest) -> String {
    let response = h.service.preview_payment(request).await;
    assert_eq!(response.status, ResponseStatus::Ok, "{:?}", response.message);
    response.data.unwrap().confirmation_token.as_str().to_string()
}

// =============================================================================
// PAYMENTS
// =============================================================================

#[tokio::test]
async fn test_payment_preview_then_execute() {
    let h = harness();
    let request = PaymentRequest {
        memo: Some("rent".to_string()),
        ..payment(alice(), bob(), "XLM", "5")
    };

    let preview = h.service.preview_payment(request.clone()).await;
    assert!(preview.success);
    let details = preview.data.as_ref().unwrap().payment_details.clone();
    assert_eq!(details.fee, Amount::from_stroops(100));
    assert_eq!(details.total_debit.to_string(), "5.00001");
    assert_eq!(details.memo.as_deref(), Some("rent"));
    assert!(!details.creates_account);

    h.submitter
        .push_status(ScriptedSubmitter::success_status(77));
    let token = preview.data.unwrap().confirmation_token;
    let response = h
        .service
        .execute_payment(execute(request, token.as_str()))
        .await;

    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("Transaction successful"));
    assert!(response.data.unwrap().hash.is_some());

    let drafts = h.submitter.signed_drafts();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].sequence, 101);
    assert!(matches!(
        &drafts[0].operations[0],
        Operation::Payment { destination, amount, .. } if *destination == bob() && *amount == units(5)
    ));

    let records = h.history.records();
    assert_eq!(records.len(), 1);
    assert!(matches!(records[0].detail, HistoryDetail::Payment { .. }));

    tokio::time::timeout(Duration::from_secs(1), h.notifier.wait_for_attempts(1))
        .await
        .unwrap();
    let events = h.notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].destination, bob());
    assert_eq!(events[0].tx_hash, records[0].tx_hash);
}

#[tokio::test]
async fn test_token_bound_to_amount() {
    let h = harness();
    let token = preview_token(&h, payment(alice(), bob(), "XLM", "50")).await;
    let loads_after_preview = h.ledger.account_loads();

    let response = h
        .service
        .execute_payment(execute(payment(alice(), bob(), "XLM", "51"), &token))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(
        response.message.as_deref(),
        Some(OrchestrationError::ConfirmationRejected.to_string().as_str())
    );
    assert_eq!(h.submitter.submit_calls(), 0);
    assert_eq!(h.ledger.account_loads(), loads_after_preview);

    // The mismatch left the token usable for the confirmed amount
    h.submitter.push_status(ScriptedSubmitter::success_status(3));
    let response = h
        .service
        .execute_payment(execute(payment(alice(), bob(), "XLM", "50"), &token))
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
}

#[tokio::test]
async fn test_token_is_single_use() {
    let h = harness();
    let request = payment(alice(), bob(), "XLM", "5");
    let token = preview_token(&h, request.clone()).await;

    h.submitter.push_status(ScriptedSubmitter::success_status(3));
    let first = h.service.execute_payment(execute(request.clone(), &token)).await;
    assert_eq!(first.status, ResponseStatus::Ok);

    let second = h.service.execute_payment(execute(request, &token)).await;
    assert_eq!(second.status, ResponseStatus::BadRequest);
    assert_eq!(h.submitter.submit_calls(), 1);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let h = harness();
    let request = payment(alice(), bob(), "XLM", "5");
    let token = preview_token(&h, request.clone()).await;

    let ttl = h.service.config().confirmation.token_ttl;
    h.clock.advance(ttl.as_millis() as u64 + 1);

    let response = h.service.execute_payment(execute(request, &token)).await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(h.submitter.submit_calls(), 0);
}

#[tokio::test]
async fn test_wrong_pin_is_unauthorized_before_network() {
    let h = harness();
    let command = ExecutePaymentCommand {
        pin: Pin::new("9999"),
        ..execute(payment(alice(), bob(), "XLM", "5"), "whatever")
    };

    let response = h.service.execute_payment(command).await;
    assert_eq!(response.status, ResponseStatus::Unauthorized);
    assert!(!response.success);
    assert_eq!(h.identity.calls(), 1);
    assert_eq!(h.ledger.account_loads(), 0);
    assert_eq!(h.submitter.submit_calls(), 0);
}

#[tokio::test]
async fn test_static_validation_precedes_authorization() {
    let h = harness();
    let response = h
        .service
        .execute_payment(execute(payment(alice(), bob(), "XLM", "0"), "t"))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(h.identity.calls(), 0);

    let response = h
        .service
        .preview_payment(payment(alice(), alice(), "XLM", "1"))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(h.ledger.account_loads(), 0);
}

#[tokio::test]
async fn test_payment_to_missing_account_creates_it() {
    let h = harness();
    let request = payment(alice(), carol(), "XLM", "5");
    let preview = h.service.preview_payment(request.clone()).await;
    let data = preview.data.unwrap();
    assert!(data.payment_details.creates_account);

    h.submitter.push_status(ScriptedSubmitter::success_status(8));
    let response = h
        .service
        .execute_payment(execute(request, data.confirmation_token.as_str()))
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(matches!(
        &h.submitter.signed_drafts()[0].operations[0],
        Operation::CreateAccount { destination, starting_balance }
            if *destination == carol() && *starting_balance == units(5)
    ));
    assert!(matches!(
        h.history.records()[0].detail,
        HistoryDetail::AccountFunded { .. }
    ));
}

#[tokio::test]
async fn test_new_account_needs_two_base_reserves() {
    let h = harness();
    let response = h
        .service
        .preview_payment(payment(alice(), carol(), "XLM", "0.5"))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("at least 1 XLM"));
}

#[tokio::test]
async fn test_credit_payment_to_missing_account() {
    let h = harness();
    let response = h
        .service
        .preview_payment(payment(alice(), carol(), &usdc_str(), "5"))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("does not exist"));
}

#[tokio::test]
async fn test_spendable_excludes_reserve() {
    // 10 - (2 + 1) * 0.5 = 8.5 spendable
    let h = harness();
    let response = h
        .service
        .preview_payment(payment(dave(), bob(), "XLM", "9"))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    let message = response.message.unwrap();
    assert!(message.contains("total 10"), "{message}");
    assert!(message.contains("reserved 1.5"), "{message}");
    assert!(message.contains("spendable 8.5"), "{message}");

    let response = h
        .service
        .preview_payment(payment(dave(), bob(), "XLM", "8.4"))
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
}

#[tokio::test]
async fn test_destination_without_trustline() {
    let h = harness();
    let response = h
        .service
        .preview_payment(payment(alice(), erin(), &usdc_str(), "5"))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("no trustline for USDC"));

    // The issuer always accepts its own asset
    h.ledger
        .insert_account(snapshot(issuer(), units(5), vec![]));
    let response = h
        .service
        .preview_payment(payment(alice(), issuer(), &usdc_str(), "5"))
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
}

#[tokio::test]
async fn test_preview_has_no_side_effects() {
    let h = harness();
    let before = h.ledger.account(&alice());
    let first = preview_token(&h, payment(alice(), bob(), "XLM", "5")).await;
    let second = preview_token(&h, payment(alice(), bob(), "XLM", "5")).await;

    assert_ne!(first, second);
    assert_eq!(h.ledger.account(&alice()), before);
    assert_eq!(h.submitter.submit_calls(), 0);
    assert!(h.history.records().is_empty());
    assert_eq!(h.identity.calls(), 0);
}

// =============================================================================
// OUTCOMES
// =============================================================================

#[tokio::test]
async fn test_unconfirmed_is_accepted_not_failed() {
    let h = harness();
    let request = payment(alice(), bob(), "XLM", "5");
    let token = preview_token(&h, request.clone()).await;

    let response = h.service.execute_payment(execute(request, &token)).await;
    assert_eq!(response.status, ResponseStatus::Accepted);
    assert!(!response.success);
    let hash = response.data.unwrap().hash.unwrap();
    assert!(response.message.unwrap().contains(hash.as_str()));
    assert_eq!(h.submitter.status_calls(), 3);
    assert!(h.history.records().is_empty());
}

#[tokio::test]
async fn test_ledger_failure_is_bad_request() {
    let h = harness();
    let request = payment(alice(), bob(), "XLM", "5");
    let token = preview_token(&h, request.clone()).await;

    h.submitter.push_status(TransactionStatus::Failed {
        report: FailureReport::operation(OperationFailure::new(
            OperationKind::Payment,
            "op_underfunded",
        )),
        result_xdr: None,
    });
    let response = h.service.execute_payment(execute(request, &token)).await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("enough"));
    assert!(response.data.unwrap().hash.is_none());
    assert!(h.history.records().is_empty());
    assert_eq!(h.notifier.attempts(), 0);
}

#[tokio::test]
async fn test_ledger_unavailable_hides_detail() {
    let h = harness();
    h.ledger.set_unavailable(true);
    let response = h
        .service
        .preview_payment(payment(alice(), bob(), "XLM", "5"))
        .await;
    assert_eq!(response.status, ResponseStatus::InternalServerError);
    assert_eq!(response.message.as_deref(), Some(INTERNAL_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_collaborator_failures_keep_success() {
    let h = harness();
    h.history.set_failing(true);
    h.notifier.set_failing(true);
    let request = payment(alice(), bob(), "XLM", "5");
    let token = preview_token(&h, request.clone()).await;

    h.submitter.push_status(ScriptedSubmitter::success_status(4));
    let response = h.service.execute_payment(execute(request, &token)).await;
    assert_eq!(response.status, ResponseStatus::Ok);

    tokio::time::timeout(Duration::from_secs(1), h.notifier.wait_for_attempts(1))
        .await
        .unwrap();
    assert!(h.notifier.events().is_empty());
}

// =============================================================================
// CONVERSIONS
// =============================================================================

#[tokio::test]
async fn test_swap_preview_reports_price_impact() {
    let h = harness();
    h.ledger
        .add_pool(&Asset::Native, units(1000), &usdc(), units(1000));

    let response = h
        .service
        .preview_swap(conversion(None, "XLM".into(), usdc_str(), "100", 1.0))
        .await;
    assert_eq!(response.status, ResponseStatus::Ok, "{:?}", response.message);
    let details = response.data.unwrap().swap_details;

    assert_eq!(details.estimated_receive.to_string(), "90.9090909");
    assert!(details.minimum_receive < details.estimated_receive);
    assert!(details.price_impact_percent > 8.0 && details.price_impact_percent < 10.0);
    assert!((details.exchange_rate - 0.909090909).abs() < 1e-6);
    assert_eq!(details.route, vec![Asset::Native, usdc()]);
    assert_eq!(details.fee, Amount::from_stroops(100));
}

#[tokio::test]
async fn test_swap_needs_own_trustline() {
    let h = harness();
    h.ledger
        .add_pool(&Asset::Native, units(1000), &eurt(), units(1000));
    let response = h
        .service
        .preview_swap(conversion(None, "XLM".into(), format!("EURT:{}", issuer()), "10", 1.0))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("EURT"));
    assert_eq!(h.ledger.path_queries(), 0);
}

#[tokio::test]
async fn test_swap_executes_to_self() {
    let h = harness();
    h.ledger
        .add_pool(&Asset::Native, units(1000), &usdc(), units(1000));
    h.submitter.push_status(ScriptedSubmitter::success_status(5));

    let response = h
        .service
        .execute_swap(ExecuteConversionCommand {
            request: conversion(None, "XLM".into(), usdc_str(), "100", 1.0),
            pin: Pin::new(PIN),
        })
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(matches!(
        &h.submitter.signed_drafts()[0].operations[0],
        Operation::PathPaymentStrictSend { destination, send_amount, .. }
            if *destination == alice() && *send_amount == units(100)
    ));
    assert!(matches!(h.history.records()[0].detail, HistoryDetail::Swap { .. }));
    assert_eq!(h.notifier.attempts(), 0);
}

#[tokio::test]
async fn test_strict_receive_maximum_send() {
    let h = harness();
    h.ledger.set_fixed_quotes(
        &Asset::Native,
        &usdc(),
        vec![PathQuote {
            source_asset: Asset::Native,
            source_amount: units(100),
            destination_asset: usdc(),
            destination_amount: units(100),
            path: vec![],
        }],
    );
    let request = conversion(Some(bob()), "XLM".into(), usdc_str(), "100", 2.0);

    let response = h.service.preview_strict_receive(request.clone()).await;
    assert_eq!(response.status, ResponseStatus::Ok, "{:?}", response.message);
    let details = response.data.unwrap().strict_receive_details;
    assert_eq!(details.estimated_send, units(100));
    assert_eq!(details.maximum_send.to_string(), "102.0408163");

    h.submitter.push_status(ScriptedSubmitter::success_status(6));
    let response = h
        .service
        .execute_strict_receive(ExecuteConversionCommand {
            request,
            pin: Pin::new(PIN),
        })
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(matches!(
        &h.submitter.signed_drafts()[0].operations[0],
        Operation::PathPaymentStrictReceive { send_max, dest_amount, .. }
            if send_max.to_string() == "102.0408163" && *dest_amount == units(100)
    ));
}

#[tokio::test]
async fn test_strict_send_minimum_receive() {
    let h = harness();
    h.ledger.set_fixed_quotes(
        &Asset::Native,
        &usdc(),
        vec![PathQuote {
            source_asset: Asset::Native,
            source_amount: units(100),
            destination_asset: usdc(),
            destination_amount: units(100),
            path: vec![eurt()],
        }],
    );
    let response = h
        .service
        .preview_strict_send(conversion(Some(bob()), "XLM".into(), usdc_str(), "100", 2.0))
        .await;
    let details = response.data.unwrap().strict_send_details;
    assert_eq!(details.minimum_receive, units(98));
    assert_eq!(details.path, vec![eurt()]);
}

#[tokio::test]
async fn test_strict_send_funds_missing_account() {
    let h = harness();
    h.ledger
        .add_pool(&usdc(), units(1000), &Asset::Native, units(1000));

    let request = conversion(Some(carol()), usdc_str(), "XLM".into(), "50", 0.0);
    let preview = h.service.preview_strict_send(request.clone()).await;
    let details = preview.data.unwrap().strict_send_details;
    assert_eq!(details.fee, Amount::from_stroops(200));
    assert_eq!(details.minimum_receive.to_string(), "47.6190476");

    h.submitter.push_status(ScriptedSubmitter::success_status(9));
    let response = h
        .service
        .execute_strict_send(ExecuteConversionCommand {
            request,
            pin: Pin::new(PIN),
        })
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);

    let draft = &h.submitter.signed_drafts()[0];
    assert_eq!(draft.operations.len(), 2);
    assert_eq!(draft.fee, Amount::from_stroops(200));
    assert!(matches!(
        &draft.operations[0],
        Operation::PathPaymentStrictSend { destination, .. } if *destination == alice()
    ));
    assert!(matches!(
        &draft.operations[1],
        Operation::CreateAccount { destination, starting_balance }
            if *destination == carol() && starting_balance.to_string() == "47.6190476"
    ));
}

#[tokio::test]
async fn test_credit_conversion_to_missing_account() {
    let h = harness();
    h.ledger
        .add_pool(&Asset::Native, units(1000), &usdc(), units(1000));
    let response = h
        .service
        .preview_strict_send(conversion(Some(carol()), "XLM".into(), usdc_str(), "10", 1.0))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("does not exist"));
}

#[tokio::test]
async fn test_no_path() {
    let h = harness();
    let response = h
        .service
        .preview_strict_send(conversion(Some(bob()), "XLM".into(), usdc_str(), "10", 1.0))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("No conversion path"));
}

#[tokio::test]
async fn test_slippage_out_of_range() {
    let h = harness();
    let response = h
        .service
        .preview_swap(conversion(None, "XLM".into(), usdc_str(), "10", 100.0))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    let response = h
        .service
        .preview_swap(conversion(None, "XLM".into(), usdc_str(), "10", -1.0))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(h.ledger.account_loads(), 0);
}

// =============================================================================
// TRUSTLINES AND FUNDING
// =============================================================================

#[tokio::test]
async fn test_add_trustline() {
    let h = harness();
    h.submitter.push_status(ScriptedSubmitter::success_status(10));
    let response = h
        .service
        .add_trustline(trustline(alice(), format!("EURT:{}", issuer())))
        .await;
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(matches!(
        &h.submitter.signed_drafts()[0].operations[0],
        Operation::ChangeTrust { asset, limit: None } if *asset == eurt()
    ));
    assert!(matches!(
        h.history.records()[0].detail,
        HistoryDetail::TrustlineAdded { .. }
    ));

    let response = h.service.add_trustline(trustline(alice(), usdc_str())).await;
    assert!(response.message.unwrap().contains("already exists"));

    let response = h.service.add_trustline(trustline(alice(), "XLM".into())).await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert_eq!(h.submitter.submit_calls(), 1);
}

#[tokio::test]
async fn test_add_trustline_needs_a_base_reserve() {
    let h = harness();
    // Reserve 1.0, spendable 0.5, needs 0.5 plus the fee
    h.ledger
        .insert_account(snapshot(erin(), amount("1.5"), vec![]));
    let response = h
        .service
        .add_trustline(trustline(erin(), usdc_str()))
        .await;
    assert_eq!(response.status, ResponseStatus::BadRequest);
    assert!(response.message.unwrap().contains("Insufficient XLM"));
}

#[tokio::test]
async fn test_remove_trustline() {
    let h = harness();
    let response = h
        .service
        .remove_trustline(trustline(alice(), usdc_str()))
        .await;
    assert!(response.message.unwrap().contains("must be zero"));

    let response = h
        .service
        .remove_trustline(trustline(erin(), usdc_str()))
        .await;
    assert!(response.message.unwrap().contains("no trustline"));

    h.submitter.push_status(ScriptedSubmitter::success_status(11));
    let response = h.service.remove_trustline(trustline(bob(), usdc_str())).await;
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(matches!(
        &h.submitter.signed_drafts()[0].operations[0],
        Operation::ChangeTrust { limit: Some(limit), .. } if limit.is_zero()
    ));
    assert!(matches!(
        h.history.records()[0].detail,
        HistoryDetail::TrustlineRemoved { .. }
    ));
}

#[tokio::test]
async fn test_fund_account() {
    let h = harness();
    let command = |destination: AccountId, starting_balance: &str| FundAccountCommand {
        source: alice().to_string(),
        destination: destination.to_string(),
        starting_balance: starting_balance.to_string(),
        pin: Pin::new(PIN),
    };

    let response = h.service.fund_account(command(bob(), "5")).await;
    assert!(response.message.unwrap().contains("already exists"));

    let response = h.service.fund_account(command(carol(), "0.9")).await;
    assert!(response.message.unwrap().contains("at least 1 XLM"));

    h.submitter.push_status(ScriptedSubmitter::success_status(12));
    let response = h.service.fund_account(command(carol(), "25")).await;
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(matches!(
        &h.submitter.signed_drafts()[0].operations[0],
        Operation::CreateAccount { starting_balance, .. } if *starting_balance == units(25)
    ));
    assert!(matches!(
        h.history.records()[0].detail,
        HistoryDetail::AccountFunded { .. }
    ));
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let h = harness();
    let mut config = h.service.config().clone();
    config.confirmation.token_ttl = Duration::ZERO;
    let result = OrchestrationService::new(
        OrchestrationDependencies {
            accounts: h.ledger.clone(),
            paths: h.ledger.clone(),
            submitter: h.submitter.clone(),
            tokens: Arc::new(InMemoryTokenStore::with_system_clock()),
            identity: h.identity.clone(),
            history: h.history.clone(),
            notifier: h.notifier.clone(),
        },
        config,
    );
    assert!(matches!(result, Err(OrchestrationError::InvalidConfig(_))));
}
