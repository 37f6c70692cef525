use crate::bridge::{ExportRequest, Figure, PlotBridge, Teardown, ensure_html};
use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::fs::write;
use std::panic::Location;
use std::sync::Arc;

use log::info;

pub const HTML_PATTERNS: &[&str] = &["holoviews.*", "hvplot.*"];

/// Displays plots as a static HTML snapshot. Nothing stays running.
pub struct HtmlBridge {
    figure: Arc<dyn Figure>,
}

impl HtmlBridge {
    pub fn new(figure: Arc<dyn Figure>) -> Self {
        Self { figure }
    }
}

impl PlotBridge for HtmlBridge {
    fn patterns(&self) -> &'static [&'static str] {
        HTML_PATTERNS
    }

    fn figure(&self) -> &Arc<dyn Figure> {
        &self.figure
    }

    fn export(&self, request: ExportRequest) -> Result<Teardown, BridgeError> {
        ensure_html(&request.format)?;

        let html = self
            .figure
            .render_html()
            .map_err(|e| BridgeError::Render {
                message: format!("Failed to render {}: {e}", self.figure.type_name()),
                location: ErrorLocation::from(Location::caller()),
            })?;

        write(&request.filename, html).map_err(|e| BridgeError::Write {
            message: format!(
                "Failed to write snapshot to {}: {e}",
                request.filename.display()
            ),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        info!(
            "Wrote {} snapshot to {}",
            self.figure.type_name(),
            request.filename.display()
        );

        Ok(Teardown::noop())
    }
}
