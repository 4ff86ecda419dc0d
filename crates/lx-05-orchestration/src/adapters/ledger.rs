//! In-memory ledger reads and path finding.
//!
//! Accounts are plain snapshots. Paths come from fixed quote lists when one
//! is registered for the pair, otherwise from constant-product pools
//! (`x × y = k`, no fee), so larger trades fill at worse rates.

use crate::domain::{LedgerClientError, PathQuote};
use crate::ports::{AccountLoader, PathFinder};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{AccountId, AccountSnapshot, Amount, Asset};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

type Pair = (Asset, Asset);

#[derive(Debug, Clone, Copy)]
struct Pool {
    send_reserve: i128,
    dest_reserve: i128,
}

/// In-memory ledger.
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<AccountId, AccountSnapshot>>,
    base_reserve: RwLock<Amount>,
    pools: RwLock<HashMap<Pair, Pool>>,
    fixed_quotes: RwLock<HashMap<Pair, Vec<PathQuote>>>,
    unavailable: AtomicBool,
    account_loads: AtomicUsize,
    path_queries: AtomicUsize,
}

impl InMemoryLedger {
    /// Empty ledger with the given base reserve.
    pub fn new(base_reserve: Amount) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            base_reserve: RwLock::new(base_reserve),
            pools: RwLock::new(HashMap::new()),
            fixed_quotes: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            account_loads: AtomicUsize::new(0),
            path_queries: AtomicUsize::new(0),
        }
    }

    /// Insert or replace an account.
    pub fn insert_account(&self, snapshot: AccountSnapshot) -> &Self {
        self.accounts
            .write()
            .insert(snapshot.account_id.clone(), snapshot);
        self
    }

    /// Current snapshot, bypassing the call counter.
    pub fn account(&self, id: &AccountId) -> Option<AccountSnapshot> {
        self.accounts.read().get(id).cloned()
    }

    /// Change the base reserve.
    pub fn set_base_reserve(&self, base_reserve: Amount) {
        *self.base_reserve.write() = base_reserve;
    }

    /// Add a two-sided pool between `a` and `b`.
    pub fn add_pool(&self, a: &Asset, a_reserve: Amount, b: &Asset, b_reserve: Amount) -> &Self {
        let mut pools = self.pools.write();
        pools.insert(
            (a.clone(), b.clone()),
            Pool {
                send_reserve: i128::from(a_reserve.stroops()),
                dest_reserve: i128::from(b_reserve.stroops()),
            },
        );
        pools.insert(
            (b.clone(), a.clone()),
            Pool {
                send_reserve: i128::from(b_reserve.stroops()),
                dest_reserve: i128::from(a_reserve.stroops()),
            },
        );
        drop(pools);
        self
    }

    /// Answer every query for `send → dest` with `quotes`, in order.
    pub fn set_fixed_quotes(&self, send: &Asset, dest: &Asset, quotes: Vec<PathQuote>) -> &Self {
        self.fixed_quotes
            .write()
            .insert((send.clone(), dest.clone()), quotes);
        self
    }

    /// Make every call fail with a network error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `load_account` calls.
    pub fn account_loads(&self) -> usize {
        self.account_loads.load(Ordering::SeqCst)
    }

    /// Number of path queries.
    pub fn path_queries(&self) -> usize {
        self.path_queries.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), LedgerClientError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerClientError::Network("ledger unavailable".to_string()));
        }
        Ok(())
    }

    fn fixed(&self, send: &Asset, dest: &Asset) -> Option<Vec<PathQuote>> {
        self.fixed_quotes
            .read()
            .get(&(send.clone(), dest.clone()))
            .cloned()
    }

    fn pool(&self, send: &Asset, dest: &Asset) -> Option<Pool> {
        self.pools.read().get(&(send.clone(), dest.clone())).copied()
    }
}

fn quote(send: &Asset, source: i128, dest: &Asset, destination: i128) -> Option<PathQuote> {
    Some(PathQuote {
        source_asset: send.clone(),
        source_amount: Amount::from_stroops(i64::try_from(source).ok()?),
        destination_asset: dest.clone(),
        destination_amount: Amount::from_stroops(i64::try_from(destination).ok()?),
        path: Vec::new(),
    })
}

#[async_trait]
impl AccountLoader for InMemoryLedger {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot, LedgerClientError> {
        self.account_loads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.accounts
            .read()
            .get(account)
            .cloned()
            .ok_or_else(|| LedgerClientError::AccountNotFound(account.to_string()))
    }

    async fn base_reserve(&self) -> Result<Amount, LedgerClientError> {
        self.check_available()?;
        Ok(*self.base_reserve.read())
    }
}

#[async_trait]
impl PathFinder for InMemoryLedger {
    async fn strict_send_paths(
        &self,
        send_asset: &Asset,
        send_amount: Amount,
        dest_asset: &Asset,
    ) -> Result<Vec<PathQuote>, LedgerClientError> {
        self.path_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if let Some(quotes) = self.fixed(send_asset, dest_asset) {
            return Ok(quotes);
        }
        let Some(pool) = self.pool(send_asset, dest_asset) else {
            return Ok(Vec::new());
        };
        let input = i128::from(send_amount.stroops());
        let output = pool.dest_reserve * input / (pool.send_reserve + input);
        if output <= 0 {
            return Ok(Vec::new());
        }
        Ok(quote(send_asset, input, dest_asset, output).into_iter().collect())
    }

    async fn strict_receive_paths(
        &self,
        send_asset: &Asset,
        dest_asset: &Asset,
        dest_amount: Amount,
    ) -> Result<Vec<PathQuote>, LedgerClientError> {
        self.path_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if let Some(quotes) = self.fixed(send_asset, dest_asset) {
            return Ok(quotes);
        }
        let Some(pool) = self.pool(send_asset, dest_asset) else {
            return Ok(Vec::new());
        };
        let output = i128::from(dest_amount.stroops());
        if output >= pool.dest_reserve {
            return Ok(Vec::new());
        }
        let numerator = pool.send_reserve * output;
        let denominator = pool.dest_reserve - output;
        let input = (numerator + denominator - 1) / denominator;
        Ok(quote(send_asset, input, dest_asset, output).into_iter().collect())
    }
}
