// src/contributions/mod.rs
pub mod memory;
pub mod providers;
pub mod router;
pub mod types;

pub use providers::{
    ExternalContributionProcessor, TokenBalanceProvider, TokenContributionProcessor,
    WalletStateProvider,
};
pub use router::{BalanceFuture, ContributionFuture, ContributionRouter};
pub use types::{
    AvailableBalance, Contribution, ContributionSource, ContributionTokenKind, ContributionType,
};
