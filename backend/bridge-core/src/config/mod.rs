//! Add-in configuration loaded from `holoviz.json`.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "holoviz.json";
const CONFIG_DIR_NAME: &str = "holoviz";
const CONFIG_VERSION: u32 = 1;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RibbonConfig {
    /// Skip registering the ribbon tab with the host.
    #[serde(default)]
    pub disable_ribbon: bool,
}

/// Defaults applied to panel server options the caller left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddinConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub ribbon: RibbonConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AddinConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ribbon: RibbonConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

// ============================================
// IMPLEMENTATION
// ============================================

impl AddinConfig {
    /// Load config from {config_dir}/holoviz.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AddinConfig)` if loaded successfully or defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AddinConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if let Some(ref address) = self.server.address
            && address.trim().is_empty()
        {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "server.address cannot be empty string".to_string(),
            });
        }

        Ok(())
    }
}

/// Platform config directory for the add-in, e.g. `~/.config/holoviz`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })
}
