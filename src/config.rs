//! Client configuration
//!
//! Loaded from `<config dir>/goldtrack/config.toml` with sensible
//! defaults; `GOLDTRACK_API_URL` overrides the base URL for one-off runs
//! against a different server.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{GoldtrackError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the dashboard API server
    pub api_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// How long the error banner stays visible, in seconds
    pub banner_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            banner_delay_secs: 5,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn banner_delay(&self) -> Duration {
        Duration::from_secs(self.banner_delay_secs)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("goldtrack").join("config.toml"))
}

/// Load configuration: file if present, defaults otherwise, env override
/// last.
pub fn load() -> Result<Config> {
    let mut config = match config_path() {
        Some(path) if path.exists() => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&raw).map_err(|e| {
                GoldtrackError::ConfigError(format!("invalid config at {}: {}", path.display(), e))
            })?
        }
        _ => Config::default(),
    };

    if let Ok(url) = std::env::var("GOLDTRACK_API_URL") {
        config.api_url = url;
    }

    Ok(config)
}
