// File: src/config.rs
// Purpose: Configuration parsing from rusty-validators.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "rusty-validators.toml";

/// Host configuration shared by every validator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub uploads: UploadsConfig,

    #[serde(default)]
    pub date: DateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default user-facing messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Shown when a mandatory field has no value
    #[serde(default = "default_missing_value")]
    pub missing_value: String,
}

/// Where uploaded files live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Files uploaded with the current request, not yet stored
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    /// Files stored for saved records, one sub-directory per primary key
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

/// Date handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// Picker format used when a date picker has none (`mm/dd/yy`)
    #[serde(default = "default_picker_format")]
    pub default_picker_format: String,
}

/// Logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_missing_value() -> String {
    "Missing required value".to_string()
}

fn default_temp_dir() -> String {
    "uploads/temp".to_string()
}

fn default_upload_dir() -> String {
    "uploads/app_formuploads".to_string()
}

fn default_picker_format() -> String {
    "mm/dd/yy".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations
impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            missing_value: default_missing_value(),
        }
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            upload_dir: default_upload_dir(),
        }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            default_picker_format: default_picker_format(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from the default path (./rusty-validators.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }
}
