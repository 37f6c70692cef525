//! Entry points the host calls while loading the add-in.

use bridge_core::config::RibbonConfig;

use log::{debug, error};
use serde::Serialize;

/// Oldest host release the bridges work with.
pub const MIN_HOST_VERSION: [u32; 3] = [5, 9, 0];

/// Development builds of the host skip the version gate.
const DEV_SUFFIX: &str = "dev";

/// Modules the host loads on startup, in load order.
pub const MODULES: &[&str] = &["hvplot_bridge", "panel_bridge", "ribbon", "udfs"];

const RIBBON_XML: &str = include_str!("ribbon/ribbon.xml");

/// One ribbon customization handed to the host.
///
/// `name` is `None` for the add-in's own tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RibbonEntry {
    pub name: Option<String>,
    pub xml: &'static str,
}

/// Whether the host version is new enough.
///
/// Only the first three dotted components are compared. A version that does
/// not parse as numbers is treated as unsupported.
pub fn is_supported_host(version: &str) -> bool {
    if version.ends_with(DEV_SUFFIX) {
        return true;
    }

    let parsed: Result<Vec<u32>, _> = version.split('.').take(3).map(str::parse).collect();

    match parsed {
        Ok(parts) => parts.as_slice() >= MIN_HOST_VERSION.as_slice(),
        Err(e) => {
            debug!("Unparsable host version {version}: {e}");
            false
        }
    }
}

fn check_host(version: &str) -> bool {
    let supported = is_supported_host(version);
    if !supported {
        let [major, minor, patch] = MIN_HOST_VERSION;
        error!("Host version >= {major}.{minor}.{patch} is required, found {version}");
    }
    supported
}

/// Modules to load, or none when the host is too old.
pub fn modules(host_version: &str) -> Vec<&'static str> {
    if !check_host(host_version) {
        return Vec::new();
    }

    MODULES.to_vec()
}

/// Ribbon customizations, or none when the host is too old or the ribbon is
/// disabled in configuration.
pub fn ribbon(host_version: &str, config: &RibbonConfig) -> Vec<RibbonEntry> {
    if !check_host(host_version) {
        return Vec::new();
    }

    if config.disable_ribbon {
        debug!("Ribbon disabled by configuration");
        return Vec::new();
    }

    vec![RibbonEntry {
        name: None,
        xml: RIBBON_XML,
    }]
}
