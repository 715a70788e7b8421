//! Configuration storage
//!
//! Persists the tool's settings (Laravel project root, database URL, PHP
//! binary) as a TOML file under the user's config directory.

use crate::error::{ModelForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Persistent configuration data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Root of the Laravel project checkout
    pub project_dir: Option<String>,
    /// Database connection URL used to list existing tables
    pub database_url: Option<String>,
    /// PHP binary used to invoke artisan
    pub php_binary: Option<String>,
}

impl ConfigFile {
    /// Get the configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                ModelForgeError::Config("could not find a configuration directory".to_string())
            })?
            .join("model-forge");

        // Ensure directory exists
        fs::create_dir_all(&config_dir)?;

        Ok(config_dir)
    }

    /// Get the configuration file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from disk, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_file)?;
        let config: ConfigFile = toml::from_str(&content).map_err(|e| {
            ModelForgeError::Config(format!("failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_file = Self::config_file()?;

        let content = toml::to_string_pretty(self).map_err(|e| {
            ModelForgeError::Config(format!("failed to serialize config: {}", e))
        })?;

        fs::write(&config_file, content)?;

        Ok(())
    }
}
