pub mod error;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capture::CapturePolicy;
use crate::config::error::ConfigSystemError;
use crate::kernel::constants;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Capture configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Record soft job failures as events.
    pub capture_soft_fails: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capture_soft_fails: true,
        }
    }
}

impl CaptureConfig {
    /// Policy value handed to the capture manager.
    pub fn policy(&self) -> CapturePolicy {
        CapturePolicy {
            capture_soft_fails: self.capture_soft_fails,
        }
    }
}

/// Router configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Convert faults raised during dispatch into responses instead of
    /// returning them to the caller.
    pub catch_faults: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { catch_faults: true }
    }
}

/// Messenger configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessengerConfig {
    /// Receiver queues available for dispatch and consumption.
    pub receivers: Vec<String>,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            receivers: vec![constants::DEFAULT_RECEIVER.to_string()],
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub capture: CaptureConfig,
    pub router: RouterConfig,
    pub messenger: MessengerConfig,
}

impl AppConfig {
    /// Load configuration from `path`, detecting the format from the file
    /// extension.
    pub fn load(path: &Path) -> Result<Self, ConfigSystemError> {
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigSystemError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let data = fs::read_to_string(path).map_err(|source| ConfigSystemError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse(&data, format)
    }

    /// Parse configuration text in the given format.
    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self, ConfigSystemError> {
        match format {
            ConfigFormat::Json => {
                serde_json::from_str(data).map_err(|e| ConfigSystemError::Parse {
                    format: "JSON",
                    source: Box::new(e),
                })
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(data).map_err(|e| ConfigSystemError::Parse {
                    format: "YAML",
                    source: Box::new(e),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigSystemError::Parse {
                format: "TOML",
                source: Box::new(e),
            }),
        }
    }
}

// Test module declaration
#[cfg(test)]
mod tests;
