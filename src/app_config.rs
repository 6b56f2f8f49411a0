use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::providers::l10n::DEFAULT_API_BASE;
use crate::stats::cache::DEFAULT_TTL_SECS;
use crate::stats::{FilterMode, SortKey};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Root of the statistics REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Release shown when none is given, e.g. "gnome-49"
    #[serde(default = "default_release")]
    pub default_release: String,

    /// Language shown when none is given (GNOME locale code)
    #[serde(default = "default_language")]
    pub default_language: String,

    /// How long fetched statistics stay valid, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay in milliseconds between per-module requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Initial sort order of the module list
    #[serde(default)]
    pub sort: SortKey,

    /// Initial quick filter
    #[serde(default)]
    pub filter_mode: FilterMode,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Cache durations offered in the preferences, (seconds, label)
pub const CACHE_TTL_OPTIONS: [(u64, &str); 4] = [
    (1800, "30 minutes"),
    (3600, "1 hour"),
    (7200, "2 hours"),
    (14400, "4 hours"),
];

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_release() -> String {
    "gnome-49".to_string()
}

fn default_language() -> String {
    "sv".to_string()
}

fn default_cache_ttl() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_request_delay_ms() -> u64 {
    100 // be gentle with the public server
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_base)
            .with_context(|| format!("Invalid API base URL: {}", self.api_base))?;

        if self.default_release.trim().is_empty() {
            return Err(anyhow!("Default release must not be empty"));
        }

        crate::language_utils::validate_language_code(&self.default_language)?;

        if self.cache_ttl == 0 {
            return Err(anyhow!("Cache duration must be greater than zero"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Default settings file: `$XDG_CONFIG_HOME/gnome-l10n/settings.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gnome-l10n")
            .join("settings.json")
    }

    /// Load settings from `path`, falling back to defaults for missing keys
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load settings, creating the file with defaults when it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            default_release: default_release(),
            default_language: default_language(),
            cache_ttl: default_cache_ttl(),
            request_timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            sort: SortKey::default(),
            filter_mode: FilterMode::default(),
            log_level: LogLevel::default(),
        }
    }
}
