//! # Invariants
//!
//! Property tests over the public quote and reserve arithmetic.

#[cfg(test)]
mod tests {
    use lx_01_reserve::{minimum_reserve, spendable_balance};
    use lx_05_orchestration::algorithms::{
        max_source, min_destination, price_impact_percent, select_strict_receive,
        select_strict_send,
    };
    use lx_05_orchestration::{BestPathPolicy, PathQuote, Slippage};
    use proptest::prelude::*;
    use shared_types::{AccountId, AccountSnapshot, Amount, Asset, BalanceLine};

    fn quote(source: i64, destination: i64) -> PathQuote {
        PathQuote {
            source_asset: Asset::Native,
            source_amount: Amount::from_stroops(source),
            destination_asset: Asset::credit("USDC", AccountId::from_public_key([9u8; 32]))
                .unwrap(),
            destination_amount: Amount::from_stroops(destination),
            path: vec![],
        }
    }

    proptest! {
        #[test]
        fn prop_minimum_receive_never_exceeds_estimate(
            stroops in 1i64..1_000_000_000_000,
            bps in 0u32..10_000,
        ) {
            let estimate = Amount::from_stroops(stroops);
            let minimum = min_destination(estimate, Slippage::from_bps(bps)).unwrap();
            prop_assert!(minimum <= estimate);
            prop_assert!(!minimum.is_negative());
        }

        #[test]
        fn prop_maximum_send_never_below_estimate(
            stroops in 1i64..1_000_000_000_000,
            bps in 0u32..9_000,
        ) {
            let estimate = Amount::from_stroops(stroops);
            let maximum = max_source(estimate, Slippage::from_bps(bps)).unwrap();
            prop_assert!(maximum >= estimate);
        }

        #[test]
        fn prop_spendable_is_total_minus_reserve(
            native in 0i64..10_000_000_000_000,
            trustlines in 0u32..20,
        ) {
            let base = Amount::from_stroops(5_000_000);
            let lines: Vec<BalanceLine> = (0..trustlines)
                .map(|i| {
                    let code = format!("TK{}", i);
                    let asset = Asset::credit(&code, AccountId::from_public_key([7u8; 32])).unwrap();
                    BalanceLine::trustline(asset, Amount::ZERO)
                })
                .collect();
            let mut balances = vec![BalanceLine::native(Amount::from_stroops(native))];
            balances.extend(lines);
            let account = AccountSnapshot {
                account_id: AccountId::from_public_key([1u8; 32]),
                sequence: 1,
                balances,
                sub_entry_count: trustlines,
            };

            let spendable = spendable_balance(&account, &Asset::Native, base, Amount::ZERO).unwrap();
            let reserve = minimum_reserve(trustlines, base).unwrap();
            prop_assert_eq!(
                spendable,
                Amount::from_stroops(native).checked_sub(reserve).unwrap()
            );
        }

        #[test]
        fn prop_price_impact_is_never_negative(
            ideal in 0.0001f64..1_000.0,
            actual in 0.0001f64..1_000.0,
        ) {
            prop_assert!(price_impact_percent(ideal, actual) >= 0.0);
        }

        #[test]
        fn prop_compare_all_picks_the_best_quote(
            amounts in prop::collection::vec(1i64..1_000_000, 1..8),
        ) {
            let sends: Vec<PathQuote> = amounts.iter().map(|a| quote(100, *a)).collect();
            let best = select_strict_send(&sends, BestPathPolicy::CompareAll).unwrap();
            prop_assert_eq!(
                best.destination_amount.stroops(),
                *amounts.iter().max().unwrap()
            );

            let receives: Vec<PathQuote> = amounts.iter().map(|a| quote(*a, 100)).collect();
            let cheapest = select_strict_receive(&receives, BestPathPolicy::CompareAll).unwrap();
            prop_assert_eq!(
                cheapest.source_amount.stroops(),
                *amounts.iter().min().unwrap()
            );

            let first = select_strict_send(&sends, BestPathPolicy::FirstAsBest).unwrap();
            prop_assert_eq!(first.destination_amount.stroops(), amounts[0]);
        }
    }
}
