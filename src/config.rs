//! Configuration management for PhoneFinder
//!
//! Configuration is read from a YAML file (defaults when the file is
//! missing), then overridden by `PHONEFINDER_*` environment variables and
//! CLI flags, and finally validated.

use crate::error::{PhoneFinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote catalog/assistant service
    #[serde(default)]
    pub service: ServiceConfig,
    /// Page storage backend
    #[serde(default)]
    pub storage: StorageConfig,
    /// Chat widget text
    #[serde(default)]
    pub chat: ChatConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the catalog and chat endpoints
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Lives as long as the process
    #[default]
    Memory,
    /// Embedded database on disk
    Sled,
}

/// Page storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database directory for the `sled` backend; the platform data
    /// directory is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory the `sled` backend opens
    ///
    /// # Errors
    ///
    /// Returns `PhoneFinderError::Storage` if no path is configured and the
    /// platform data directory cannot be determined
    pub fn resolved_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("com", "phonefinder", "phonefinder")
            .ok_or_else(|| PhoneFinderError::Storage("Could not determine data directory".into()))?;
        Ok(dirs.data_dir().join("page-storage"))
    }
}

/// Chat widget configuration
///
/// Defaults are the Arabic strings of the original widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Bot entry appended when an exchange fails
    #[serde(default = "default_error_message")]
    pub error_message: String,

    /// Text of the typing indicator
    #[serde(default = "default_typing_text")]
    pub typing_text: String,

    /// Price label on recommendation cards
    #[serde(default = "default_price_label")]
    pub price_label: String,

    /// Match score label on recommendation cards
    #[serde(default = "default_match_label")]
    pub match_label: String,

    /// Separator between recommendation reasons
    #[serde(default = "default_reasons_separator")]
    pub reasons_separator: String,
}

fn default_error_message() -> String {
    "خطأ: تحقق من الاتصال بالخادم".to_string()
}

fn default_typing_text() -> String {
    "...".to_string()
}

fn default_price_label() -> String {
    "السعر".to_string()
}

fn default_match_label() -> String {
    "نسبة التطابق".to_string()
}

fn default_reasons_separator() -> String {
    " • ".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            error_message: default_error_message(),
            typing_text: default_typing_text(),
            price_label: default_price_label(),
            match_label: default_match_label(),
            reasons_separator: default_reasons_separator(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "phonefinder=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(PhoneFinderError::Io)?;
        let config = serde_yaml::from_str(&contents).map_err(PhoneFinderError::Yaml)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("PHONEFINDER_BASE_URL") {
            tracing::debug!(base_url = %base_url, "Env override: PHONEFINDER_BASE_URL");
            self.service.base_url = base_url;
        }

        if let Ok(backend) = std::env::var("PHONEFINDER_STORAGE_BACKEND") {
            self.storage.backend = match backend.to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "sled" => StorageBackend::Sled,
                _ => {
                    tracing::warn!("Invalid storage backend: {}, using default", backend);
                    StorageBackend::default()
                }
            };
        }

        if let Ok(path) = std::env::var("PHONEFINDER_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(message) = std::env::var("PHONEFINDER_CHAT_ERROR_MESSAGE") {
            self.chat.error_message = message;
        }

        if let Ok(json_logs) = std::env::var("PHONEFINDER_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => self.logging.json_format = v,
                Err(_) => {
                    tracing::warn!("Invalid value for PHONEFINDER_JSON_LOGS: {}", json_logs);
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            self.service.base_url = base_url.clone();
        }
        if let Some(path) = &cli.storage_path {
            self.storage.backend = StorageBackend::Sled;
            self.storage.path = Some(path.clone());
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.service.base_url).map_err(|e| {
            PhoneFinderError::Config(format!(
                "service.base_url is not a valid URL ({}): {}",
                self.service.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(PhoneFinderError::Config(format!(
                "service.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.chat.error_message.trim().is_empty() {
            return Err(
                PhoneFinderError::Config("chat.error_message cannot be empty".to_string()).into(),
            );
        }

        if self.logging.level.trim().is_empty() {
            return Err(
                PhoneFinderError::Config("logging.level cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
