pub mod builder;

use crate::LOOPBACK_HOSTNAME;

use serde::{Deserialize, Serialize};

/// Where a running panel server can be reached.
///
/// Produced on the server's worker thread once its event loop is running;
/// only then are the bound port and prefix known to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Explicitly configured address, `None` when the server was not given one.
    pub address: Option<String>,
    pub port: u16,
    /// URL path prefix, either empty or starting with `/`.
    pub prefix: String,
    pub server_id: String,
}

impl ServerInfo {
    /// Host portion of the redirect URL, falling back to `localhost`.
    pub fn host(&self) -> &str {
        match self.address.as_deref() {
            Some(address) if !address.is_empty() => address,
            _ => LOOPBACK_HOSTNAME,
        }
    }

    /// `http://{address}:{port}{prefix}`
    ///
    /// IPv6 literals are bracketed, so `::1` becomes `http://[::1]:{port}`.
    pub fn redirect_url(&self) -> String {
        let host = self.host();
        if host.contains(':') && !host.starts_with('[') {
            format!("http://[{host}]:{}{}", self.port, self.prefix)
        } else {
            format!("http://{host}:{}{}", self.port, self.prefix)
        }
    }
}
