use crate::entry::{self, RibbonEntry};
use crate::error::AddinError;

use bridge_core::bridge::{BridgeRegistry, Figure, PlotBridge};
use bridge_core::config::{AddinConfig, default_config_dir};

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

/// The loaded add-in: its configuration and the bridges it can hand out.
pub struct Addin {
    host_version: String,
    config: AddinConfig,
    registry: BridgeRegistry,
}

impl Addin {
    pub fn new(host_version: impl Into<String>, config: AddinConfig) -> Result<Self, AddinError> {
        config.validate()?;
        let registry = BridgeRegistry::with_defaults(config.server.clone())?;

        Ok(Self {
            host_version: host_version.into(),
            config,
            registry,
        })
    }

    /// Load `holoviz.json` from `config_dir`, falling back to defaults when absent.
    pub fn load(host_version: impl Into<String>, config_dir: &Path) -> Result<Self, AddinError> {
        let config = AddinConfig::load(config_dir)?;
        Self::new(host_version, config)
    }

    /// Load from the platform config directory.
    pub fn load_default(host_version: impl Into<String>) -> Result<Self, AddinError> {
        let config_dir = default_config_dir()?;
        info!("Loading add-in config from {}", config_dir.display());
        Self::load(host_version, &config_dir)
    }

    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    pub fn config(&self) -> &AddinConfig {
        &self.config
    }

    pub fn modules(&self) -> Vec<&'static str> {
        entry::modules(&self.host_version)
    }

    pub fn ribbon(&self) -> Vec<RibbonEntry> {
        entry::ribbon(&self.host_version, &self.config.ribbon)
    }

    /// The bridge that displays `figure`, if its type is recognised.
    pub fn bridge_for(&self, figure: Arc<dyn Figure>) -> Option<Box<dyn PlotBridge>> {
        let type_name = figure.type_name().to_string();
        let bridge = self.registry.create(figure);

        if bridge.is_none() {
            warn!("No bridge can display {type_name}");
        }

        bridge
    }
}
