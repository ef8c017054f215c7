// src/lib.rs
// Public library surface for the demo binary and integration tests.

pub mod config;
pub mod contributions;
pub mod metrics;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::contributions::{
    AvailableBalance, Contribution, ContributionRouter, ContributionSource,
    ContributionTokenKind, ContributionType,
};
