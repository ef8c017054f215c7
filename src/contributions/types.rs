// src/contributions/types.rs
use serde::{Deserialize, Serialize};

/// Backend that currently holds settlement authority.
/// Derived from linkage state on every call, never stored between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    InternalTokenBacked,
    ExternalWallet,
}

impl ContributionSource {
    /// Stable label for logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ContributionSource::InternalTokenBacked => "internal_token_backed",
            ContributionSource::ExternalWallet => "external_wallet",
        }
    }
}

impl std::fmt::Display for ContributionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic category of a contribution. The router only passes it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionType {
    RecurringTip,
    OneTimeTip,
    AutoContribute,
}

/// Token classes held by the internal ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionTokenKind {
    /// Virtual grant tokens.
    Vg,
    /// Tokens bought through a SKU order.
    Sku,
}

impl ContributionTokenKind {
    /// Token kind whose balance is reported while no external wallet is linked.
    pub const CONTRIBUTION: ContributionTokenKind = ContributionTokenKind::Vg;

    pub fn as_str(self) -> &'static str {
        match self {
            ContributionTokenKind::Vg => "vg",
            ContributionTokenKind::Sku => "sku",
        }
    }
}

/// One contribution request, built once by the router and handed to exactly
/// one processor. `source` always names the processor it was sent to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    pub publisher_id: String,
    pub amount: f64,
    pub source: ContributionSource,
}

/// `Some(amount)` when a balance could be determined.
pub type AvailableBalance = Option<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_labels_are_stable() {
        assert_eq!(
            ContributionSource::InternalTokenBacked.as_str(),
            "internal_token_backed"
        );
        assert_eq!(ContributionSource::ExternalWallet.to_string(), "external_wallet");
    }

    #[test]
    fn contribution_serializes_with_type_key() {
        let c = Contribution {
            contribution_type: ContributionType::OneTimeTip,
            publisher_id: "example.com".into(),
            amount: 5.0,
            source: ContributionSource::ExternalWallet,
        };
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["type"], "one_time_tip");
        assert_eq!(v["source"], "external_wallet");
        assert_eq!(v["publisher_id"], "example.com");
    }

    #[test]
    fn contribution_token_kind_is_vg() {
        assert_eq!(ContributionTokenKind::CONTRIBUTION, ContributionTokenKind::Vg);
    }
}
