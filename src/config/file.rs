//! Configuration file handling

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Infura project key
    #[serde(default)]
    pub infura_api_key: Option<String>,

    /// Explicit RPC URL, used instead of Infura when set
    #[serde(default)]
    pub rpc_url: Option<String>,
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

/// Directory under the user config dir
const APP_DIR: &str = "wyvern-match-scan";

fn file_error(action: &str, path: &Path, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidFile(format!("{} {}: {}", action, path.display(), e))
}

impl ConfigFile {
    /// `<config_dir>/wyvern-match-scan/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load the file at the default path; `None` if there is none yet
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_if_exists(&Self::default_path())
    }

    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| file_error("Failed to read", path, e))?;
        Ok(toml::from_str(&content).map_err(ConfigError::from)?)
    }

    /// Write to `path`, creating its directory
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| file_error("Failed to serialize", path, e))?;

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| file_error("Failed to create", dir, e))?;
        }
        std::fs::write(path, content).map_err(|e| file_error("Failed to write", path, e))?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Store the Infura key in the file at `path`
    pub fn set_infura_key(&mut self, key: String, path: &Path) -> Result<()> {
        self.infura_api_key = Some(key);
        self.save(path)
    }
}
