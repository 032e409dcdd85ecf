//! Configuration management for txsweep
//!
//! This module handles loading, validation, and management of
//! txsweep configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the transaction data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Transaction document file name (JSON array of records)
    #[serde(default = "default_main_file")]
    pub main_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            main_file: default_main_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_main_file() -> String {
    "transactions.json".to_string()
}

/// Chaining policy for the deduplication time window
///
/// Controls which member of a forming group the window is measured from
/// when deciding whether the next candidate is close enough in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainingPolicy {
    /// Measure from the group's first member: the whole group spans at
    /// most one window end-to-end
    FirstMember,
    /// Measure from the most recently admitted member: a chain of
    /// near-duplicates may span more than one window end-to-end
    Consecutive,
}

impl Default for ChainingPolicy {
    fn default() -> Self {
        ChainingPolicy::Consecutive
    }
}

impl std::str::FromStr for ChainingPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first_member" | "first" | "anchor" => Ok(ChainingPolicy::FirstMember),
            "consecutive" | "chain" => Ok(ChainingPolicy::Consecutive),
            _ => Err(format!("Invalid chaining policy: {}", s)),
        }
    }
}

impl std::fmt::Display for ChainingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainingPolicy::FirstMember => write!(f, "first_member"),
            ChainingPolicy::Consecutive => write!(f, "consecutive"),
        }
    }
}

/// Deduplication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Maximum allowed gap in milliseconds between two records for them
    /// to be considered duplicates of one another
    #[serde(default = "default_window_millis")]
    pub window_millis: i64,
    /// How the time window is anchored while a group forms
    #[serde(default)]
    pub chaining: ChainingPolicy,
    /// Match on payee (falls back to narration when payee is empty)
    #[serde(default = "default_true")]
    pub match_payee: bool,
    /// Match on amount
    #[serde(default = "default_true")]
    pub match_amount: bool,
    /// Match on currency
    #[serde(default = "default_true")]
    pub match_currency: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window_millis: default_window_millis(),
            chaining: ChainingPolicy::default(),
            match_payee: true,
            match_amount: true,
            match_currency: true,
        }
    }
}

fn default_window_millis() -> i64 {
    60_000
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Deduplication settings
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.dedup.window_millis < 0 {
            return Err(ConfigError::InvalidValue {
                field: "dedup.window_millis".to_string(),
                reason: "Window must be non-negative".to_string(),
            });
        }

        if !self.dedup.match_payee && !self.dedup.match_amount && !self.dedup.match_currency {
            return Err(ConfigError::InvalidValue {
                field: "dedup".to_string(),
                reason: "At least one match field must be enabled".to_string(),
            });
        }

        Ok(())
    }

    /// Get the full path to the transaction document file
    pub fn document_path(&self) -> PathBuf {
        self.data.path.join(&self.data.main_file)
    }
}

// ==================== Tests ====================
