//! Shared test world.

use lx_03_confirmation::{InMemoryTokenStore, MockTimeSource};
use lx_04_executor::{ExecutorConfig, ScriptedSubmitter, SigningKey};
use lx_05_orchestration::{
    InMemoryHistoryStore, InMemoryLedger, OrchestrationDependencies, OrchestrationService,
    OrchestratorConfig, RecordingNotifier, StaticIdentityProvider,
};
use shared_types::{AccountId, AccountSnapshot, Amount, Asset, BalanceLine};
use std::sync::Arc;

/// PIN registered for every fixture user.
pub const PIN: &str = "2468";

/// 0.5 XLM.
pub const BASE_RESERVE_STROOPS: i64 = 5_000_000;

/// Wired service plus handles on every simulated collaborator.
pub struct World {
    pub service: OrchestrationService,
    pub ledger: Arc<InMemoryLedger>,
    pub submitter: Arc<ScriptedSubmitter>,
    pub tokens: Arc<InMemoryTokenStore>,
    pub clock: Arc<MockTimeSource>,
    pub history: Arc<InMemoryHistoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn account(byte: u8) -> AccountId {
    AccountId::from_public_key([byte; 32])
}

/// 10 XLM and a USDC trustline holding 40.
pub fn sender() -> AccountId {
    account(0x10)
}

/// 2 XLM and an empty USDC trustline.
pub fn receiver() -> AccountId {
    account(0x20)
}

pub fn issuer() -> AccountId {
    account(0x99)
}

pub fn usdc() -> Asset {
    Asset::credit("USDC", issuer()).unwrap()
}

pub fn usdc_code() -> String {
    format!("USDC:{}", issuer())
}

pub fn units(n: i64) -> Amount {
    Amount::from_units(n).unwrap()
}

pub fn snapshot(id: AccountId, native: Amount, lines: Vec<BalanceLine>) -> AccountSnapshot {
    let mut balances = vec![BalanceLine::native(native)];
    let sub_entry_count = lines.len() as u32;
    balances.extend(lines);
    AccountSnapshot {
        account_id: id,
        sequence: 4_000,
        balances,
        sub_entry_count,
    }
}

/// World with `max_poll_attempts` polls per transaction.
pub fn world(max_poll_attempts: u32) -> World {
    world_with(OrchestratorConfig {
        executor: ExecutorConfig {
            max_poll_attempts,
            ..ExecutorConfig::fast()
        },
        ..OrchestratorConfig::default()
    })
}

pub fn world_with(config: OrchestratorConfig) -> World {
    let ledger = Arc::new(InMemoryLedger::new(Amount::from_stroops(BASE_RESERVE_STROOPS)));
    ledger
        .insert_account(snapshot(
            sender(),
            units(10),
            vec![BalanceLine::trustline(usdc(), units(40))],
        ))
        .insert_account(snapshot(
            receiver(),
            units(2),
            vec![BalanceLine::trustline(usdc(), Amount::ZERO)],
        ));

    let submitter = Arc::new(ScriptedSubmitter::new());
    let clock = Arc::new(MockTimeSource::new(0));
    let tokens = Arc::new(InMemoryTokenStore::new(clock.clone()));
    let identity = Arc::new(
        StaticIdentityProvider::new()
            .with_user(sender(), PIN, SigningKey::from_bytes([0x51; 32]))
            .with_user(receiver(), PIN, SigningKey::from_bytes([0x52; 32])),
    );
    let history = Arc::new(InMemoryHistoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let service = OrchestrationService::new(
        OrchestrationDependencies {
            accounts: ledger.clone(),
            paths: ledger.clone(),
            submitter: submitter.clone(),
            tokens: tokens.clone(),
            identity,
            history: history.clone(),
            notifier: notifier.clone(),
        },
        config,
    )
    .unwrap();

    World {
        service,
        ledger,
        submitter,
        tokens,
        clock,
        history,
        notifier,
    }
}
