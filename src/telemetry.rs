// src/telemetry.rs
use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
/// Fails (instead of panicking) if a subscriber is already installed.
pub fn init_tracing(cfg: &LogConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    if cfg.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()?;
    }
    Ok(())
}

/// Hex characters kept from the SHA-256 of a publisher id.
pub const PUBLISHER_FINGERPRINT_LEN: usize = 16;

/// Log-safe stand-in for a publisher id; raw ids never reach the logs.
pub(crate) fn publisher_fingerprint(publisher_id: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hex = format!("{:x}", Sha256::digest(publisher_id.as_bytes()));
    hex.truncate(PUBLISHER_FINGERPRINT_LEN);
    hex
}
