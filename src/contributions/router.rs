// src/contributions/router.rs
//! # Contribution Router
//! Picks the settlement backend for a contribution and answers "how much can
//! the user contribute right now" without callers knowing which backend is
//! authoritative.
//!
//! Authority is derived from the wallet linkage flag at the moment of each
//! call: linked means the external wallet, unlinked means the internal token
//! ledger. Nothing is cached between calls and nothing is serialized across
//! concurrent calls; each call acts on the linkage it observed.

use std::future::{ready, Future};
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use metrics::counter;
use tracing::{debug, info};

use super::providers::{
    ExternalContributionProcessor, TokenBalanceProvider, TokenContributionProcessor,
    WalletStateProvider,
};
use super::types::{
    AvailableBalance, Contribution, ContributionSource, ContributionTokenKind, ContributionType,
};
use crate::telemetry::publisher_fingerprint;

const LOG_TARGET: &str = "contribution_router";

/// Resolves with the chosen processor's outcome, or `Ok(true)` for a no-op.
pub type ContributionFuture<'a> = Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>>;

/// Resolves with the authoritative provider's balance.
pub type BalanceFuture<'a> = Pin<Box<dyn Future<Output = Result<AvailableBalance>> + Send + 'a>>;

/// Holds typed handles to its four collaborators, injected once at construction.
#[derive(Clone)]
pub struct ContributionRouter {
    wallet: Arc<dyn WalletStateProvider>,
    tokens: Arc<dyn TokenBalanceProvider>,
    token_processor: Arc<dyn TokenContributionProcessor>,
    external_processor: Arc<dyn ExternalContributionProcessor>,
}

impl ContributionRouter {
    pub fn new(
        wallet: Arc<dyn WalletStateProvider>,
        tokens: Arc<dyn TokenBalanceProvider>,
        token_processor: Arc<dyn TokenContributionProcessor>,
        external_processor: Arc<dyn ExternalContributionProcessor>,
    ) -> Self {
        Self {
            wallet,
            tokens,
            token_processor,
            external_processor,
        }
    }

    /// Which backend is authoritative right now. Reads only the cached linkage flag.
    pub fn classify_source(&self) -> ContributionSource {
        if self.wallet.has_external_wallet() {
            ContributionSource::ExternalWallet
        } else {
            ContributionSource::InternalTokenBacked
        }
    }

    /// Route a contribution to exactly one processor and hand back its future untouched.
    ///
    /// The amount check, source classification and record construction happen
    /// here, before the returned future is first polled. Non-positive amounts
    /// resolve `Ok(true)` without contacting any processor.
    ///
    /// `publisher_id` must be non-empty and `amount` must not be NaN; violating
    /// either is a caller bug and panics in debug builds.
    pub fn send_contribution(
        &self,
        contribution_type: ContributionType,
        publisher_id: &str,
        amount: f64,
    ) -> ContributionFuture<'_> {
        debug_assert!(!publisher_id.is_empty(), "publisher_id must not be empty");
        debug_assert!(!amount.is_nan(), "amount must not be NaN");
        counter!("contribution_requests_total").increment(1);

        // Negative amounts are treated like zero: a satisfied no-op.
        if amount <= 0.0 {
            info!(
                target: LOG_TARGET,
                amount,
                kind = ?contribution_type,
                "attempting to send a contribution with zero amount"
            );
            counter!("contribution_noop_total").increment(1);
            return Box::pin(ready(Ok(true)));
        }

        let contribution = Contribution {
            contribution_type,
            publisher_id: publisher_id.to_string(),
            amount,
            source: self.classify_source(),
        };

        counter!("contribution_dispatch_total", "source" => contribution.source.as_str())
            .increment(1);

        match contribution.source {
            ContributionSource::InternalTokenBacked => {
                debug!(
                    target: LOG_TARGET,
                    publisher = %publisher_fingerprint(&contribution.publisher_id),
                    amount,
                    source = %contribution.source,
                    processor = self.token_processor.name(),
                    "dispatching contribution"
                );
                self.token_processor.process(contribution)
            }
            ContributionSource::ExternalWallet => {
                debug!(
                    target: LOG_TARGET,
                    publisher = %publisher_fingerprint(&contribution.publisher_id),
                    amount,
                    source = %contribution.source,
                    processor = self.external_processor.name(),
                    "dispatching contribution"
                );
                self.external_processor.process(contribution)
            }
        }
    }

    /// Balance of whichever backend is authoritative at call time.
    ///
    /// Linkage is re-read on every call. Exactly one provider is queried, and
    /// its error (if any) comes back unchanged.
    pub fn available_balance(&self) -> BalanceFuture<'_> {
        let source = self.classify_source();
        counter!("balance_queries_total", "source" => source.as_str()).increment(1);

        match source {
            ContributionSource::ExternalWallet => {
                debug!(target: LOG_TARGET, provider = self.wallet.name(), "querying wallet balance");
                let pending = self.wallet.balance();
                Box::pin(async move { pending.await.map(Some) })
            }
            ContributionSource::InternalTokenBacked => {
                let kind = ContributionTokenKind::CONTRIBUTION;
                debug!(
                    target: LOG_TARGET,
                    provider = self.tokens.name(),
                    token = kind.as_str(),
                    "querying token balance"
                );
                let pending = self.tokens.available_token_balance(kind);
                Box::pin(async move { pending.await.map(Some) })
            }
        }
    }
}
