//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::sensors::SensorCatalog;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Known sensor types and their default units
    #[serde(default)]
    pub sensors: SensorCatalog,
}

/// Reading store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("solarium").to_string_lossy().to_string())
        .unwrap_or_else(|| "./solarium_data".to_string())
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// CSV seeding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Directory holding one `<sensor>.csv` file per sensor
    #[serde(default = "default_sample_dir")]
    pub sample_dir: String,

    /// Seed the store when the server starts
    #[serde(default)]
    pub on_start: bool,
}

fn default_sample_dir() -> String {
    "./sample".to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sample_dir: default_sample_dir(),
            on_start: false,
        }
    }
}

/// Reading collector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Base URL of the Solarium API the collector posts to
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Seconds between sampling rounds
    #[serde(default = "default_collect_interval")]
    pub interval_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_collect_interval() -> u64 {
    60
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            interval_secs: default_collect_interval(),
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

    pub file: Option<String>,
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
            file: None,
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("solarium").join("config.toml")),
            Some(PathBuf::from("/etc/solarium/config.toml")),
            Some(PathBuf::from("./solarium.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Storage overrides
        if let Ok(data_dir) = std::env::var("SOLARIUM_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Server overrides
        if let Ok(host) = std::env::var("SOLARIUM_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SOLARIUM_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Seed overrides
        if let Ok(sample_dir) = std::env::var("SOLARIUM_SAMPLE_DIR") {
            self.seed.sample_dir = sample_dir;
        }

        // Collector overrides
        if let Ok(api_url) = std::env::var("SOLARIUM_API_URL") {
            self.collector.api_url = api_url;
        }
        if let Ok(interval) = std::env::var("SOLARIUM_COLLECT_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.collector.interval_secs = secs;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("SOLARIUM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SOLARIUM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageSection::default(),
            server: ServerConfig::default(),
            seed: SeedConfig::default(),
            collector: CollectorConfig::default(),
            logging: LoggingConfig::default(),
            sensors: SensorCatalog::default(),
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
    r#"# Solarium Configuration
#
# Environment variables override these settings:
# - SOLARIUM_DATA_DIR
# - SOLARIUM_HOST
# - SOLARIUM_PORT
# - SOLARIUM_SAMPLE_DIR
# - SOLARIUM_API_URL
# - SOLARIUM_COLLECT_INTERVAL
# - SOLARIUM_LOG_LEVEL
# - SOLARIUM_LOG_FORMAT

[storage]
# Directory for the readings database
data_dir = "~/.local/share/solarium"

[server]
# API server host
host = "0.0.0.0"

# API server port
port = 8000

[seed]
# Directory with one <sensor>.csv file per sensor
sample_dir = "./sample"

# Seed the store when the server starts
on_start = false

[collector]
# Solarium API the collector posts readings to
api_url = "http://localhost:8000"

# Seconds between sampling rounds
interval_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/solarium/solarium.log"

# Known sensor types and the unit applied to readings that omit one
[[sensors]]
name = "temperature"
unit = "C"

[[sensors]]
name = "humidity"
unit = "%"

[[sensors]]
name = "light"
unit = "lux"
"#
    .to_string()
}
