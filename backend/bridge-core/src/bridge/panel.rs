use crate::bridge::redirect::write_redirect;
use crate::bridge::{ExportRequest, Figure, PlotBridge, Teardown, ensure_html};
use crate::config::ServerConfig;
use crate::error::bridge::BridgeError;
use crate::server::{STARTUP_TIMEOUT, launch};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

pub const PANEL_PATTERNS: &[&str] = &[
    "panel.template.base.BaseTemplate",
    "panel.viewable.Viewable",
    "panel.viewable.Viewer",
];

/// Displays interactive panels by serving them from a short-lived server.
///
/// Each export starts its own server; the returned [`Teardown`] is the only
/// way to stop it. Servers are never pooled or reused across exports.
pub struct PanelBridge {
    figure: Arc<dyn Figure>,
    defaults: ServerConfig,
    timeout: Duration,
}

impl PanelBridge {
    pub fn new(figure: Arc<dyn Figure>) -> Self {
        Self {
            figure,
            defaults: ServerConfig::default(),
            timeout: STARTUP_TIMEOUT,
        }
    }

    pub fn with_defaults(mut self, defaults: ServerConfig) -> Self {
        self.defaults = defaults;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl PlotBridge for PanelBridge {
    fn patterns(&self) -> &'static [&'static str] {
        PANEL_PATTERNS
    }

    fn figure(&self) -> &Arc<dyn Figure> {
        &self.figure
    }

    /// Start a server for the figure and write a redirect to `request.filename`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::UnsupportedFormat`] before anything is started
    /// - [`BridgeError::StartupFailure`] / [`BridgeError::StartupTimeout`] from startup
    /// - [`BridgeError::Write`] if the redirect could not be written; the server
    ///   is stopped first
    fn export(&self, request: ExportRequest) -> Result<Teardown, BridgeError> {
        ensure_html(&request.format)?;

        let mut options = request.options;
        let server_id = options.ensure_server_id();
        options.apply_defaults(&self.defaults);

        debug!(
            "Exporting {} via panel server {server_id} with {} option(s)",
            self.figure.type_name(),
            options.len()
        );

        let handle = launch(Arc::clone(&self.figure), options, self.timeout)?;
        let url = handle.info().redirect_url();

        if let Err(e) = write_redirect(&request.filename, &url) {
            warn!("Stopping panel server {server_id} after failed redirect write");
            handle.stop();
            return Err(e);
        }

        info!(
            "Wrote redirect to {url} at {}",
            request.filename.display()
        );

        Ok(Teardown::from(handle))
    }
}
