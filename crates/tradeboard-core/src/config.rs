//! Configuration types for Tradeboard

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming an optional JSON config file
pub const CONFIG_PATH_ENV: &str = "TRADEBOARD_CONFIG";

/// Trade API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL (e.g., "http://127.0.0.1:18787")
    pub url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: format!("http://127.0.0.1:{}", default_server_port()),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Trade board limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_max_items_per_side")]
    pub max_items_per_side: usize,
}

fn default_max_items_per_side() -> usize {
    6
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_items_per_side: default_max_items_per_side(),
        }
    }
}

/// Stage delays for the simulated purchase/offer progress displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// One delay per buy stage transition
    #[serde(default = "default_buy_stage_delays_ms")]
    pub buy_stage_delays_ms: Vec<u64>,

    /// One delay per offer stage transition
    #[serde(default = "default_offer_stage_delays_ms")]
    pub offer_stage_delays_ms: Vec<u64>,
}

fn default_buy_stage_delays_ms() -> Vec<u64> {
    vec![1500, 2000, 2500]
}

fn default_offer_stage_delays_ms() -> Vec<u64> {
    vec![1500, 2000]
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            buy_stage_delays_ms: default_buy_stage_delays_ms(),
            offer_stage_delays_ms: default_offer_stage_delays_ms(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trade API settings
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    /// Port the local trade API listens on
    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_server_port() -> u16 {
    18787
}

impl AppConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Serialization(format!("{}: {}", path.display(), e)))
    }

    /// Load from the file named by `TRADEBOARD_CONFIG`, or fall back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path),
            _ => Ok(Self::default()),
        }
    }
}
