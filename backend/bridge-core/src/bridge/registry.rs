//! Type-name pattern table mapping figures to bridges.

use crate::bridge::{Figure, HTML_PATTERNS, HtmlBridge, PANEL_PATTERNS, PanelBridge, PlotBridge};
use crate::config::ServerConfig;
use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::Arc;

use log::{debug, trace};
use regex::{Regex, escape};

/// Builds a bridge around a figure.
pub type BridgeFactory = dyn Fn(Arc<dyn Figure>) -> Box<dyn PlotBridge> + Send + Sync;

struct Entry {
    pattern: String,
    matcher: Regex,
    factory: Arc<BridgeFactory>,
}

/// Ordered table of type-name patterns. The first matching pattern wins.
///
/// Patterns are dotted type names where `*` matches any run of characters,
/// so `hvplot.*` matches `hvplot.plotting.core.hvPlot`.
#[derive(Default)]
pub struct BridgeRegistry {
    entries: Vec<Entry>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the panel and static HTML bridges.
    pub fn with_defaults(server_defaults: ServerConfig) -> Result<Self, BridgeError> {
        let mut registry = Self::new();

        registry.register(PANEL_PATTERNS, move |figure| -> Box<dyn PlotBridge> {
            Box::new(PanelBridge::new(figure).with_defaults(server_defaults.clone()))
        })?;
        registry.register(HTML_PATTERNS, |figure| -> Box<dyn PlotBridge> {
            Box::new(HtmlBridge::new(figure))
        })?;

        Ok(registry)
    }

    #[track_caller]
    pub fn register<F>(&mut self, patterns: &[&str], factory: F) -> Result<(), BridgeError>
    where
        F: Fn(Arc<dyn Figure>) -> Box<dyn PlotBridge> + Send + Sync + 'static,
    {
        let factory: Arc<BridgeFactory> = Arc::new(factory);

        for pattern in patterns {
            let matcher = compile_pattern(pattern)?;
            debug!("Registered bridge pattern {pattern}");
            self.entries.push(Entry {
                pattern: pattern.to_string(),
                matcher,
                factory: Arc::clone(&factory),
            });
        }

        Ok(())
    }

    /// The pattern that claims `type_name`, if any.
    pub fn find(&self, type_name: &str) -> Option<&str> {
        self.entry_for(type_name).map(|entry| entry.pattern.as_str())
    }

    /// Build the bridge registered for the figure's type.
    pub fn create(&self, figure: Arc<dyn Figure>) -> Option<Box<dyn PlotBridge>> {
        let entry = self.entry_for(figure.type_name())?;
        Some((entry.factory)(figure))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    fn entry_for(&self, type_name: &str) -> Option<&Entry> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.matcher.is_match(type_name));

        if entry.is_none() {
            trace!("No bridge registered for {type_name}");
        }

        entry
    }
}

#[track_caller]
fn compile_pattern(pattern: &str) -> Result<Regex, BridgeError> {
    let body = pattern
        .split('*')
        .map(escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{body}$")).map_err(|e| BridgeError::Pattern {
        message: format!("Invalid bridge pattern '{pattern}': {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
