// src/config.rs
//! Runtime configuration: logging plus the seed state for the in-memory
//! collaborators used by the demo binary and local runs.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "CONTRIBUTION_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/contribution.toml";
pub const DEFAULT_JSON_PATH: &str = "config/contribution.json";

fn default_log_filter() -> String {
    "contribution_router=info,warn".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub wallet: WalletSeed,
    #[serde(default)]
    pub tokens: TokenSeed,
    #[serde(default)]
    pub processors: ProcessorSeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Initial state of the external wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletSeed {
    #[serde(default)]
    pub linked: bool,
    #[serde(default)]
    pub balance: f64,
}

/// Initial token ledger balances per token kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSeed {
    #[serde(default)]
    pub vg: f64,
    #[serde(default)]
    pub sku: f64,
}

/// Outcome each in-memory processor resolves with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSeed {
    #[serde(default = "default_true")]
    pub token_outcome: bool,
    #[serde(default = "default_true")]
    pub external_outcome: bool,
}

impl Default for ProcessorSeed {
    fn default() -> Self {
        Self {
            token_outcome: true,
            external_outcome: true,
        }
    }
}

impl RouterConfig {
    /// Clamp seed balances to finite, non-negative values and restore an empty filter.
    fn sanitize(mut self) -> Self {
        self.wallet.balance = clamp_balance(self.wallet.balance);
        self.tokens.vg = clamp_balance(self.tokens.vg);
        self.tokens.sku = clamp_balance(self.tokens.sku);
        if self.log.filter.trim().is_empty() {
            self.log.filter = default_log_filter();
        }
        self
    }
}

fn clamp_balance(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<RouterConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading contribution config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
}

/// Load config using env var + fallbacks:
/// 1) $CONTRIBUTION_CONFIG_PATH
/// 2) config/contribution.toml
/// 3) config/contribution.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<RouterConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(RouterConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<RouterConfig> {
    if hint_ext == "json" {
        return parse_json(s);
    }
    if hint_ext == "toml" {
        return parse_toml(s);
    }
    // No usable extension: sniff JSON first, then TOML.
    if let Ok(cfg) = parse_json(s) {
        return Ok(cfg);
    }
    parse_toml(s).map_err(|e| anyhow!("unsupported contribution config format: {e}"))
}

fn parse_toml(s: &str) -> Result<RouterConfig> {
    let cfg: RouterConfig = toml::from_str(s).context("parsing TOML contribution config")?;
    Ok(cfg.sanitize())
}

fn parse_json(s: &str) -> Result<RouterConfig> {
    let cfg: RouterConfig =
        serde_json::from_str(s).context("parsing JSON contribution config")?;
    Ok(cfg.sanitize())
}
