//! Configuration for the navigator's local storage.

use std::path::{Path, PathBuf};

use case_record::Language;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default quota, matching the typical browser local storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Error types for loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML is malformed or has the wrong shape
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Storage configuration
    pub storage: StorageConfig,
    /// General settings
    pub general: GeneralConfig,
}

impl NavigatorConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), "Loaded navigator config");
        Ok(config)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the file backend
    pub data_dir: PathBuf,
    /// Key the case record is stored under
    pub case_key: String,
    /// Key the language preference is stored under
    pub language_key: String,
    /// Largest value the backend accepts; `None` for no limit
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            case_key: "wrn-case-state".to_string(),
            language_key: "wrn-language".to_string(),
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

/// General settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Language for a first visit with nothing saved
    pub default_language: Language,
}
