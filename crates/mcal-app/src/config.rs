//! Application configuration.

use crate::error::{AppError, AppResult};
use mcal_feed::FeedConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// REST endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// REST API root for history and ticker snapshots.
    #[serde(default = "default_rest_base_url")]
    pub base_url: String,
}

fn default_rest_base_url() -> String {
    mcal_rest::DEFAULT_BASE_URL.to_string()
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: default_rest_base_url(),
        }
    }
}

/// Streaming feed configuration subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    /// WebSocket endpoint root.
    #[serde(default = "default_ws_base_url")]
    pub ws_base_url: String,
    /// Reconnect attempts per key before giving up.
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,
    /// Base delay for reconnection backoff (ms).
    #[serde(default = "default_reconnect_base_delay_ms")]
    pub reconnect_base_delay_ms: u64,
}

fn default_ws_base_url() -> String {
    "wss://stream.binance.com:9443/ws".to_string()
}

fn default_max_reconnect_attempts() -> u32 {
    5
}

fn default_reconnect_base_delay_ms() -> u64 {
    3000
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            ws_base_url: default_ws_base_url(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            reconnect_base_delay_ms: default_reconnect_base_delay_ms(),
        }
    }
}

impl From<FeedSettings> for FeedConfig {
    fn from(settings: FeedSettings) -> Self {
        Self {
            ws_base_url: settings.ws_base_url,
            max_reconnect_attempts: settings.max_reconnect_attempts,
            reconnect_base_delay_ms: settings.reconnect_base_delay_ms,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Symbols to track.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// Trailing days of history to seed per symbol.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    /// Seconds between calendar/stats refresh reports.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default)]
    pub rest: RestConfig,
    #[serde(default)]
    pub feed: FeedSettings,
}

fn default_symbols() -> Vec<String> {
    vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()]
}

fn default_history_days() -> u32 {
    31
}

fn default_refresh_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            history_days: default_history_days(),
            refresh_secs: default_refresh_secs(),
            rest: RestConfig::default(),
            feed: FeedSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from a config file, falling back to defaults when it does
    /// not exist.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
