//! # Ledger Orchestration Benchmarks
//!
//! Hot pure functions on the preview path:
//!
//! | Subsystem | Function | Called |
//! |-----------|----------|--------|
//! | lx-01 Reserve | `spendable_balance` | every pre-flight |
//! | lx-02 Classifier | `classify` | every failed outcome |
//! | lx-05 Orchestration | slippage bounds, path selection | every conversion preview |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lx_01_reserve::spendable_balance;
use lx_02_error_classifier::{classify, FailureDetail, FailureReport, OperationFailure};
use lx_05_orchestration::algorithms::{max_source, min_destination, select_strict_send};
use lx_05_orchestration::{BestPathPolicy, PathQuote, Slippage};
use shared_types::{AccountId, AccountSnapshot, Amount, Asset, BalanceLine, OperationKind};

fn usdc() -> Asset {
    Asset::credit("USDC", AccountId::from_public_key([9u8; 32])).unwrap()
}

// ============================================================================
// LX-01: Reserve
// ============================================================================

fn bench_spendable_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("lx-01-reserve");
    let base = Amount::from_stroops(5_000_000);

    for trustlines in [0u32, 10, 100] {
        let mut balances = vec![BalanceLine::native(Amount::from_stroops(1_000_000_000))];
        for i in 0..trustlines {
            let asset = Asset::credit(&format!("T{}", i), AccountId::from_public_key([7u8; 32]))
                .unwrap();
            balances.push(BalanceLine::trustline(asset, Amount::ZERO));
        }
        let account = AccountSnapshot {
            account_id: AccountId::from_public_key([1u8; 32]),
            sequence: 1,
            balances,
            sub_entry_count: trustlines,
        };

        group.bench_with_input(
            BenchmarkId::new("spendable_native", trustlines),
            &account,
            |b, account| {
                b.iter(|| spendable_balance(black_box(account), &Asset::Native, base, Amount::ZERO))
            },
        );
    }
    group.finish();
}

// ============================================================================
// LX-02: Classifier
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("lx-02-error-classifier");

    let transaction_only = FailureReport::transaction("tx_bad_seq");
    let with_asset = FailureReport::operation(
        OperationFailure::new(OperationKind::PathPaymentStrictSend, "op_no_trust")
            .with_detail(FailureDetail::NoTrust { asset: usdc() }),
    );
    let unknown = FailureReport::transaction("tx_something_new");

    group.bench_function("transaction_code", |b| {
        b.iter(|| classify(black_box(&transaction_only)))
    });
    group.bench_function("operation_code_with_asset", |b| {
        b.iter(|| classify(black_box(&with_asset)))
    });
    group.bench_function("humanized_fallback", |b| {
        b.iter(|| classify(black_box(&unknown)))
    });
    group.finish();
}

// ============================================================================
// LX-05: Quote arithmetic
// ============================================================================

fn bench_quote_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("lx-05-orchestration");
    let estimate = Amount::from_stroops(1_000_000_000);
    let slippage = Slippage::from_bps(200);

    group.bench_function("min_destination", |b| {
        b.iter(|| min_destination(black_box(estimate), slippage))
    });
    group.bench_function("max_source", |b| {
        b.iter(|| max_source(black_box(estimate), slippage))
    });

    for size in [1usize, 10, 100] {
        let quotes: Vec<PathQuote> = (0..size)
            .map(|i| PathQuote {
                source_asset: Asset::Native,
                source_amount: estimate,
                destination_asset: usdc(),
                destination_amount: Amount::from_stroops(1_000 + i as i64),
                path: vec![],
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("select_compare_all", size),
            &quotes,
            |b, quotes| b.iter(|| select_strict_send(black_box(quotes), BestPathPolicy::CompareAll)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_spendable_balance, bench_classify, bench_quote_math);
criterion_main!(benches);
