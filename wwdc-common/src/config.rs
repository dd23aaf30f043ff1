//! Configuration file loading
//!
//! The agent reads an optional TOML file. Every key is optional; values that
//! are missing here fall back to environment variables or compiled defaults
//! in the agent crate.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TomlConfig {
    /// URL of the remote session catalog document
    pub catalog_url: Option<String>,
    /// How long a fetched catalog stays fresh, in seconds
    pub cache_ttl_secs: Option<u64>,
    /// Total HTTP request timeout, in seconds
    pub http_timeout_secs: Option<u64>,
    /// Default tracing filter for the command-line host (e.g. "info")
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file at an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str::<TomlConfig>(&content)?;
        debug!(path = %path.display(), "Loaded TOML config");
        Ok(config)
    }

    /// Load the platform config file, or an empty config if none exists
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Ok(path) => Self::load(&path),
            Err(Error::Config(reason)) => {
                debug!(%reason, "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Locate the config file for the platform
///
/// Linux checks `~/.config/wwdc/config.toml` first, then
/// `/etc/wwdc/config.toml`. Other platforms use the user config directory.
pub fn default_config_path() -> Result<PathBuf> {
    let config_path = if cfg!(target_os = "linux") {
        let user_config = dirs::config_dir().map(|d| d.join("wwdc").join("config.toml"));
        let system_config = PathBuf::from("/etc/wwdc/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else {
        dirs::config_dir()
            .map(|d| d.join("wwdc").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", config_path)))
    }
}
