//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::HttpClientConfig;
use crate::controllers::DEFAULT_REFRESH_INTERVAL;
use crate::i18n::Language;
use crate::models::{AnalysisType, Category};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analyzer backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 0 disables the timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    120 // AI analysis can take a while
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

/// Dashboard behavior and defaults
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default)]
    pub default_category: Category,

    #[serde(default)]
    pub default_analysis_type: AnalysisType,

    /// Language used until one is stored in the preferences
    #[serde(default)]
    pub language: Language,
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_secs()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            default_category: Category::default(),
            default_analysis_type: AnalysisType::default(),
            language: Language::default(),
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

/// Client-local storage
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_prefs_path")]
    pub prefs_path: String,
}

fn default_prefs_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("stock-ai-analyzer")
                .join("prefs.toml")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./stock_ai_prefs.toml".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefs_path: default_prefs_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let lookup = Self::lookup(&Self::default_paths());
        lookup.log();
        lookup.config
    }

    /// User config dir first, then `./config.toml`
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("stock-ai-analyzer").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// First loadable file of `paths`, else defaults; environment overrides apply either way
    ///
    /// Nothing is logged here, so the lookup can run before tracing is set up.
    pub fn lookup(paths: &[PathBuf]) -> ConfigLookup {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigLookup {
                        config,
                        loaded_from: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        ConfigLookup {
            config: Self::from_env(),
            loaded_from: None,
            failures,
        }
    }

    /// An explicit path must load; otherwise fall back to the default lookup
    pub fn resolve(path: Option<&Path>) -> Result<ConfigLookup, ConfigError> {
        match path {
            Some(path) => Ok(ConfigLookup {
                config: Self::load_with_env(path)?,
                loaded_from: Some(path.to_path_buf()),
                failures: Vec::new(),
            }),
            None => Ok(Self::lookup(&Self::default_paths())),
        }
    }

    pub fn prefs_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.prefs_path)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("STOCK_AI_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("STOCK_AI_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        // Dashboard overrides
        if let Some(refresh) = var("STOCK_AI_REFRESH_SECS") {
            if let Ok(secs) = refresh.parse() {
                self.dashboard.refresh_interval_secs = secs;
            }
        }

        // Storage overrides
        if let Some(path) = var("STOCK_AI_PREFS_PATH") {
            self.storage.prefs_path = path;
        }

        // Logging overrides
        if let Some(level) = var("STOCK_AI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("STOCK_AI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where a configuration came from, and the files skipped on the way
#[derive(Debug)]
pub struct ConfigLookup {
    pub config: Config,
    pub loaded_from: Option<PathBuf>,
    pub failures: Vec<ConfigError>,
}

impl ConfigLookup {
    pub fn log(&self) {
        for e in &self.failures {
            tracing::warn!("Failed to load config: {}", e);
        }
        match &self.loaded_from {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Stock AI Analyzer Configuration
#
# Environment variables override these settings:
# - STOCK_AI_API_URL
# - STOCK_AI_REQUEST_TIMEOUT_SECS
# - STOCK_AI_REFRESH_SECS
# - STOCK_AI_PREFS_PATH
# - STOCK_AI_LOG_LEVEL
# - STOCK_AI_LOG_FORMAT

[api]
# Analyzer backend URL
base_url = "http://localhost:5000"

# Request timeout in seconds (0 disables it)
request_timeout_secs = 120

[dashboard]
# Auto-refresh period of the price grid (seconds)
refresh_interval_secs = 30

# Category shown first: popular, crypto or borsa_istanbul
default_category = "popular"

# Analysis window: daily, weekly, short_term or long_term
default_analysis_type = "short_term"

# Interface language until one is chosen: tr or en
language = "tr"

[storage]
# Where the language choice and disclaimer acknowledgement are kept
# prefs_path = "~/.local/share/stock-ai-analyzer/prefs.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
