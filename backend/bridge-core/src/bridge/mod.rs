//! Plot bridges: adapters the host uses to display a figure.
//!
//! The host picks a bridge by matching the figure's type name against each
//! bridge's declared patterns (see [`BridgeRegistry`]), then drives it through
//! [`PlotBridge::can_export`], [`PlotBridge::size_hint`] and
//! [`PlotBridge::export`].
//!
//! Two bridges exist:
//!
//! - [`PanelBridge`] - serves interactive panels from a live server and writes
//!   a redirect document pointing at it
//! - [`HtmlBridge`] - writes a static HTML snapshot of the figure

mod figure;
mod html;
mod panel;
pub mod redirect;
mod registry;
mod teardown;

pub use figure::{Figure, RenderError};
pub use html::{HTML_PATTERNS, HtmlBridge};
pub use panel::{PANEL_PATTERNS, PanelBridge};
pub use registry::{BridgeFactory, BridgeRegistry};
pub use teardown::Teardown;

use crate::error::bridge::BridgeError;
use crate::server::ServerOptions;

use common::ErrorLocation;

use models::{ExportFormat, SizeHint};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

/// One export call from the host.
///
/// `width`, `height` and `dpi` are advisory; neither bridge uses them.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub dpi: Option<f64>,
    pub format: ExportFormat,
    pub filename: PathBuf,
    pub options: ServerOptions,
}

impl ExportRequest {
    pub fn new(format: impl Into<ExportFormat>, filename: impl Into<PathBuf>) -> Self {
        Self {
            width: None,
            height: None,
            dpi: None,
            format: format.into(),
            filename: filename.into(),
            options: ServerOptions::default(),
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn with_options(mut self, options: ServerOptions) -> Self {
        self.options = options;
        self
    }
}

pub trait PlotBridge: Send + Sync {
    /// Type-name patterns this bridge handles.
    fn patterns(&self) -> &'static [&'static str];

    fn figure(&self) -> &Arc<dyn Figure>;

    fn can_export(&self, format: &ExportFormat) -> bool {
        *format == ExportFormat::Html
    }

    /// Preferred control size in points, when the figure declares one.
    fn size_hint(&self, dpi: f64) -> Option<SizeHint> {
        self.figure().options().size_hint(dpi)
    }

    fn export(&self, request: ExportRequest) -> Result<Teardown, BridgeError>;
}

#[track_caller]
pub(crate) fn ensure_html(format: &ExportFormat) -> Result<(), BridgeError> {
    match format {
        ExportFormat::Html => Ok(()),
        ExportFormat::Other(other) => Err(BridgeError::UnsupportedFormat {
            message: format!("Unable to export as '{other}'"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
