//! The embedded HTTP server that serves one figure.

use crate::bridge::Figure;
use crate::error::server::ServerError;
use crate::server::options::{
    ADDRESS_OPTION, PORT_OPTION, PREFIX_OPTION, SERVER_ID_OPTION, ServerOptions,
};
use crate::DEFAULT_BIND_ADDRESS;

use common::ErrorLocation;

use models::{ServerInfo, ServerInfoBuilder};

use std::net::TcpListener as StdTcpListener;
use std::panic::Location;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use log::{debug, error, info};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

const HEALTH_ENDPOINT: &str = "/health";
const HEALTH_RESPONSE: &str = "ok";

const RESERVED_PREFIX_CHARS: [char; 4] = ['{', '}', '?', '#'];
const PARAMETER_SIGILS: [char; 2] = [':', '*'];

#[derive(Clone)]
struct PanelState {
    figure: Arc<dyn Figure>,
}

/// A panel server that has been configured but not started.
///
/// Construction validates the options and opens nothing; the socket is only
/// bound by [`PanelServer::start`].
pub(crate) struct PanelServer {
    figure: Arc<dyn Figure>,
    address: Option<String>,
    port: u16,
    prefix: String,
    server_id: String,
}

impl PanelServer {
    #[track_caller]
    pub(crate) fn new(
        figure: Arc<dyn Figure>,
        options: &ServerOptions,
    ) -> Result<Self, ServerError> {
        let address = match options.get(ADDRESS_OPTION) {
            None | Some(Value::Null) => None,
            Some(Value::String(address)) => Some(address.clone()),
            Some(other) => {
                return Err(ServerError::Config {
                    message: format!("Option '{ADDRESS_OPTION}' must be a string, got {other}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let port = match options.get(PORT_OPTION) {
            None | Some(Value::Null) => 0,
            Some(value) => parse_port(value)?,
        };

        let prefix = match options.get(PREFIX_OPTION) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(prefix)) => validate_prefix(prefix)?,
            Some(other) => {
                return Err(ServerError::Config {
                    message: format!("Option '{PREFIX_OPTION}' must be a string, got {other}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let server_id = options
            .server_id_text()
            .ok_or_else(|| ServerError::Config {
                message: format!("Option '{SERVER_ID_OPTION}' is required"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        for (key, _) in options.iter() {
            if ![ADDRESS_OPTION, PORT_OPTION, PREFIX_OPTION, SERVER_ID_OPTION]
                .contains(&key.as_str())
            {
                debug!("Panel server {server_id}: passing through option '{key}'");
            }
        }

        Ok(Self {
            figure,
            address,
            port,
            prefix,
            server_id,
        })
    }

    /// Bind the listener and schedule the serve task on `runtime`.
    ///
    /// The serve task only makes progress once the runtime's loop is driven,
    /// but the socket is bound and accepting into its backlog on return.
    #[track_caller]
    pub(crate) fn start(self, runtime: &Runtime) -> Result<ServerInfo, ServerError> {
        let host = bind_host(self.address.as_deref());

        let std_listener =
            StdTcpListener::bind((host, self.port)).map_err(|e| ServerError::Bind {
                message: format!("Failed to bind {host}:{}: {e}", self.port),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            })?;

        std_listener
            .set_nonblocking(true)
            .map_err(|e| ServerError::Bind {
                message: format!("Failed to make listener non-blocking: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            })?;

        let listener = {
            let _guard = runtime.enter();
            TcpListener::from_std(std_listener).map_err(|e| ServerError::Bind {
                message: format!("Failed to register listener with runtime: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            })?
        };

        let bound = listener.local_addr().map_err(|e| ServerError::Bind {
            message: format!("Failed to read bound address: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        let server_info = ServerInfoBuilder::default()
            .with_address(self.address.clone())
            .with_port(bound.port())
            .with_prefix(self.prefix.clone())
            .with_server_id(self.server_id.clone())
            .build()?;

        let router = self.router();
        let server_id = self.server_id;

        runtime.spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("Panel server {server_id} stopped serving: {e}");
            }
        });

        info!("Panel server {} listening on {bound}", server_info.server_id);

        Ok(server_info)
    }

    fn router(&self) -> Router {
        let state = PanelState {
            figure: Arc::clone(&self.figure),
        };

        let mut router = Router::new()
            .route(&format!("{}/", self.prefix), get(serve_panel))
            .route(
                &format!("{}{HEALTH_ENDPOINT}", self.prefix),
                get(serve_health),
            );

        if !self.prefix.is_empty() {
            router = router.route(&self.prefix, get(serve_panel));
        }

        router.with_state(state)
    }
}

async fn serve_panel(State(state): State<PanelState>) -> Response {
    match state.figure.render_html() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(
                "Failed to render {} for panel server: {e}",
                state.figure.type_name()
            );
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn serve_health() -> &'static str {
    HEALTH_RESPONSE
}

#[track_caller]
fn parse_port(value: &Value) -> Result<u16, ServerError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u16>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ServerError::Config {
        message: format!("Option '{PORT_OPTION}' must be a port number, got {value}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Host to bind: the configured address without IPv6 brackets, or the
/// loopback default.
pub(crate) fn bind_host(address: Option<&str>) -> &str {
    match address.map(|a| a.trim_start_matches('[').trim_end_matches(']')) {
        Some(host) if !host.is_empty() => host,
        _ => DEFAULT_BIND_ADDRESS,
    }
}

/// Normalize `prefix` and reject anything the router would read as a path
/// parameter or the redirect URL would read as a query or fragment.
#[track_caller]
pub(crate) fn validate_prefix(prefix: &str) -> Result<String, ServerError> {
    let normalized = normalize_prefix(prefix);

    let reserved = normalized.contains(RESERVED_PREFIX_CHARS)
        || normalized
            .split('/')
            .any(|segment| segment.starts_with(PARAMETER_SIGILS));

    if reserved {
        return Err(ServerError::Config {
            message: format!("Option '{PREFIX_OPTION}' must be a literal path, got '{prefix}'"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(normalized)
}

/// `"panel/"` and `"/panel"` both become `"/panel"`; `"/"` becomes `""`.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
