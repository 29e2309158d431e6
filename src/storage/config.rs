//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory. A missing file
//! yields the defaults.

use crate::export::types::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Export settings
    pub export: ExportOptions,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Logging-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "monark", "MonarkProcessing")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, StorageError> {
    load_config_from(&get_config_path())
}

/// Load application configuration from a specific file.
pub fn load_config_from(path: &Path) -> Result<AppConfig, StorageError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| StorageError::IoError(e.to_string()))?;

    toml::from_str(&content).map_err(|e| StorageError::ParseError(e.to_string()))
}

/// Save application configuration to a specific file.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| StorageError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| StorageError::IoError(e.to_string()))?;

    Ok(())
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
