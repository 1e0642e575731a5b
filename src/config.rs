use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{ChainError, Result};

/// Set to `1` to zero every simulated delay at load time.
pub const NO_DELAY_ENV: &str = "EMOTIONCHAIN_NO_DELAY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub delays: DelayConfig,
    pub log_level: String,
    /// History entries shown per contract
    pub history_preview: usize,
}

/// Simulated latency, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub classify_ms: u64,
    pub sign_ms: u64,
    pub confirm_ms: u64,
    pub create_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            classify_ms: 600,
            sign_ms: 300,
            confirm_ms: 1200,
            create_ms: 800,
        }
    }
}

impl DelayConfig {
    pub fn none() -> Self {
        Self {
            classify_ms: 0,
            sign_ms: 0,
            confirm_ms: 0,
            create_ms: 0,
        }
    }

    pub fn classify(&self) -> Duration {
        Duration::from_millis(self.classify_ms)
    }

    pub fn sign(&self) -> Duration {
        Duration::from_millis(self.sign_ms)
    }

    pub fn confirm(&self) -> Duration {
        Duration::from_millis(self.confirm_ms)
    }

    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delays: DelayConfig::default(),
            log_level: "info".to_string(),
            history_preview: 5,
        }
    }
}

impl Config {
    /// Defaults with every delay zeroed
    pub fn instant() -> Self {
        Self {
            delays: DelayConfig::none(),
            ..Default::default()
        }
    }

    /// `<config_dir>/emotionchain/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("emotionchain")
            .join("config.json")
    }

    /// Load from `path`, or the default location.
    ///
    /// A missing or empty file yields defaults; a malformed one is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(Self::default_path);
        let mut config = Self::read(&path)?;

        if std::env::var(NO_DELAY_ENV).map_or(false, |v| v == "1") {
            config.delays = DelayConfig::none();
        }

        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::warn!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            ChainError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
