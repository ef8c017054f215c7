// src/contributions/memory.rs
//! In-memory collaborators. Used by the demo binary and by tests; each one
//! records what it was asked so call counts can be asserted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Result};

use super::providers::{
    ExternalContributionProcessor, TokenBalanceProvider, TokenContributionProcessor,
    WalletStateProvider,
};
use super::router::ContributionRouter;
use super::types::{Contribution, ContributionTokenKind};
use crate::config::RouterConfig;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// --- External wallet ---

/// External wallet with a flippable linkage flag.
#[derive(Debug)]
pub struct InMemoryWallet {
    linked: AtomicBool,
    balance: Mutex<f64>,
    failure: Mutex<Option<String>>,
    balance_queries: AtomicUsize,
}

impl InMemoryWallet {
    pub fn new(linked: bool, balance: f64) -> Self {
        Self {
            linked: AtomicBool::new(linked),
            balance: Mutex::new(balance),
            failure: Mutex::new(None),
            balance_queries: AtomicUsize::new(0),
        }
    }

    pub fn set_linked(&self, linked: bool) {
        self.linked.store(linked, Ordering::SeqCst);
    }

    pub fn set_balance(&self, balance: f64) {
        *lock(&self.balance) = balance;
    }

    /// Make every following `balance()` call fail with `msg`.
    pub fn fail_with(&self, msg: impl Into<String>) {
        *lock(&self.failure) = Some(msg.into());
    }

    pub fn clear_failure(&self) {
        *lock(&self.failure) = None;
    }

    pub fn balance_queries(&self) -> usize {
        self.balance_queries.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl WalletStateProvider for InMemoryWallet {
    fn has_external_wallet(&self) -> bool {
        self.linked.load(Ordering::SeqCst)
    }

    async fn balance(&self) -> Result<f64> {
        self.balance_queries.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = lock(&self.failure).clone() {
            return Err(anyhow!(msg));
        }
        Ok(*lock(&self.balance))
    }

    fn name(&self) -> &'static str {
        "in-memory-wallet"
    }
}

// --- Token ledger ---

/// Token ledger keyed by token kind. Unknown kinds report zero.
#[derive(Debug, Default)]
pub struct InMemoryTokenLedger {
    balances: Mutex<HashMap<ContributionTokenKind, f64>>,
    failure: Mutex<Option<String>>,
    queries: Mutex<Vec<ContributionTokenKind>>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, kind: ContributionTokenKind, amount: f64) {
        lock(&self.balances).insert(kind, amount);
    }

    pub fn fail_with(&self, msg: impl Into<String>) {
        *lock(&self.failure) = Some(msg.into());
    }

    /// Token kinds queried so far, in order.
    pub fn queries(&self) -> Vec<ContributionTokenKind> {
        lock(&self.queries).clone()
    }
}

#[async_trait::async_trait]
impl TokenBalanceProvider for InMemoryTokenLedger {
    async fn available_token_balance(&self, kind: ContributionTokenKind) -> Result<f64> {
        lock(&self.queries).push(kind);
        if let Some(msg) = lock(&self.failure).clone() {
            return Err(anyhow!(msg));
        }
        Ok(lock(&self.balances).get(&kind).copied().unwrap_or(0.0))
    }

    fn name(&self) -> &'static str {
        "in-memory-token-ledger"
    }
}

// --- Processors ---

/// Processor that records every contribution and resolves with a preset outcome.
/// Implements both processor traits so either slot can use it.
#[derive(Debug)]
pub struct RecordingProcessor {
    name: &'static str,
    outcome: Mutex<Result<bool, String>>,
    calls: Mutex<Vec<Contribution>>,
}

impl RecordingProcessor {
    pub fn with_outcome(name: &'static str, outcome: bool) -> Self {
        Self {
            name,
            outcome: Mutex::new(Ok(outcome)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(name: &'static str) -> Self {
        Self::with_outcome(name, true)
    }

    pub fn set_outcome(&self, outcome: bool) {
        *lock(&self.outcome) = Ok(outcome);
    }

    /// Make every following `process()` call fail with `msg`.
    pub fn fail_with(&self, msg: impl Into<String>) {
        *lock(&self.outcome) = Err(msg.into());
    }

    pub fn calls(&self) -> Vec<Contribution> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn record(&self, contribution: Contribution) -> Result<bool> {
        lock(&self.calls).push(contribution);
        lock(&self.outcome).clone().map_err(|msg| anyhow!(msg))
    }
}

#[async_trait::async_trait]
impl TokenContributionProcessor for RecordingProcessor {
    async fn process(&self, contribution: Contribution) -> Result<bool> {
        self.record(contribution)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[async_trait::async_trait]
impl ExternalContributionProcessor for RecordingProcessor {
    async fn process(&self, contribution: Contribution) -> Result<bool> {
        self.record(contribution)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// --- Wiring ---

/// In-memory collaborator set seeded from config. Keeps typed handles so the
/// caller can still flip linkage or inspect calls after building a router.
pub struct Collaborators {
    pub wallet: Arc<InMemoryWallet>,
    pub ledger: Arc<InMemoryTokenLedger>,
    pub token_processor: Arc<RecordingProcessor>,
    pub external_processor: Arc<RecordingProcessor>,
}

impl Collaborators {
    pub fn from_config(cfg: &RouterConfig) -> Self {
        let ledger = InMemoryTokenLedger::new();
        ledger.set_balance(ContributionTokenKind::Vg, cfg.tokens.vg);
        ledger.set_balance(ContributionTokenKind::Sku, cfg.tokens.sku);

        Self {
            wallet: Arc::new(InMemoryWallet::new(cfg.wallet.linked, cfg.wallet.balance)),
            ledger: Arc::new(ledger),
            token_processor: Arc::new(RecordingProcessor::with_outcome(
                "token-processor",
                cfg.processors.token_outcome,
            )),
            external_processor: Arc::new(RecordingProcessor::with_outcome(
                "external-processor",
                cfg.processors.external_outcome,
            )),
        }
    }

    pub fn router(&self) -> ContributionRouter {
        ContributionRouter::new(
            self.wallet.clone(),
            self.ledger.clone(),
            self.token_processor.clone(),
            self.external_processor.clone(),
        )
    }
}
