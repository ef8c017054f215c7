// src/contributions/providers.rs
//! Collaborators the router depends on. Implementations own their own retry,
//! idempotency and failure semantics; the router never reinterprets an `Err`.

use anyhow::Result;

use super::types::{Contribution, ContributionTokenKind};

/// Linkage state and balance of the user's external custodial wallet.
#[async_trait::async_trait]
pub trait WalletStateProvider: Send + Sync {
    /// Cached linkage flag. Must not block or touch the network.
    fn has_external_wallet(&self) -> bool;
    async fn balance(&self) -> Result<f64>;
    fn name(&self) -> &'static str;
}

/// Balances held in the internal token ledger.
#[async_trait::async_trait]
pub trait TokenBalanceProvider: Send + Sync {
    async fn available_token_balance(&self, kind: ContributionTokenKind) -> Result<f64>;
    fn name(&self) -> &'static str;
}

/// Settles a contribution by spending internal tokens.
#[async_trait::async_trait]
pub trait TokenContributionProcessor: Send + Sync {
    async fn process(&self, contribution: Contribution) -> Result<bool>;
    fn name(&self) -> &'static str;
}

/// Settles a contribution through the linked external wallet.
#[async_trait::async_trait]
pub trait ExternalContributionProcessor: Send + Sync {
    async fn process(&self, contribution: Contribution) -> Result<bool>;
    fn name(&self) -> &'static str;
}
