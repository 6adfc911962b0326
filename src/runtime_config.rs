// =============================================================================
// Runtime Configuration — service plumbing settings
// =============================================================================
//
// Only deployment plumbing lives here: where to listen, where the dashboard
// assets are, and how to reach the price provider. The numerical parameters
// (indicator windows, prediction window, refresh interval) are fixed
// constants in their own modules.
//
// All fields carry `#[serde(default)]` so a partial or empty JSON file loads.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Seconds between background refreshes of every cached ticker.
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "stockscope_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_range() -> String {
    "1d".to_string()
}

fn default_interval() -> String {
    "1m".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36"
        .to_string()
}

// =============================================================================
// YahooConfig
// =============================================================================

/// Connection settings for the chart provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chart range requested per fetch.
    #[serde(default = "default_range")]
    pub range: String,

    /// Bar interval requested per fetch.
    #[serde(default = "default_interval")]
    pub interval: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            range: default_range(),
            interval: default_interval(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Socket address for the HTTP server.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding `index.html` and the dashboard assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub yahoo: YahooConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            yahoo: YahooConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `STOCKSCOPE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(addr) = non_empty("STOCKSCOPE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(dir) = non_empty("STOCKSCOPE_STATIC_DIR") {
            self.static_dir = dir;
        }
        if let Some(url) = non_empty("STOCKSCOPE_YAHOO_BASE_URL") {
            self.yahoo.base_url = url;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5000");
        assert_eq!(cfg.static_dir, "static");
        assert_eq!(cfg.yahoo.range, "1d");
        assert_eq!(cfg.yahoo.interval, "1m");
        assert_eq!(cfg.yahoo.timeout_secs, 10);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5000");
        assert_eq!(cfg.yahoo.base_url, "https://query1.finance.yahoo.com");
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "bind_addr": "127.0.0.1:8080", "yahoo": { "interval": "5m" } }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.yahoo.interval, "5m");
        assert_eq!(cfg.yahoo.range, "1d");
        assert_eq!(cfg.static_dir, "static");
    }

    #[test]
    fn env_overrides_replace_non_empty_values() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_overrides(|key| match key {
            "STOCKSCOPE_BIND_ADDR" => Some("127.0.0.1:9000".to_string()),
            "STOCKSCOPE_STATIC_DIR" => Some("   ".to_string()),
            "STOCKSCOPE_YAHOO_BASE_URL" => Some("http://localhost:4010".to_string()),
            _ => None,
        });
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.static_dir, "static");
        assert_eq!(cfg.yahoo.base_url, "http://localhost:4010");
    }

    #[test]
    fn load_missing_file_is_error() {
        assert!(RuntimeConfig::load("/nonexistent/stockscope_config.json").is_err());
    }
}
