use crate::error::model_error::ModelError;
use crate::{ErrorLocation, ServerInfo};

use std::panic::Location;

use url::Url;

/// Builder for creating validated ServerInfo instances.
#[derive(Debug, Default)]
pub struct ServerInfoBuilder {
    address: Option<String>,
    port: Option<u16>,
    prefix: Option<String>,
    server_id: Option<String>,
}

impl ServerInfoBuilder {
    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = Some(server_id.into());
        self
    }

    /// Build the ServerInfo with validation.
    ///
    /// The prefix defaults to empty. The assembled redirect URL must parse,
    /// which rejects addresses the host could never navigate to.
    #[track_caller]
    pub fn build(self) -> Result<ServerInfo, ModelError> {
        let port = self.port.ok_or_else(|| ModelError::Validation {
            message: String::from("Port is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if port == 0 {
            return Err(ModelError::Validation {
                message: String::from("Port must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let prefix = self.prefix.unwrap_or_default();

        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(ModelError::Validation {
                message: format!("Prefix must start with '/': {prefix}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let server_id = self.server_id.ok_or_else(|| ModelError::Validation {
            message: String::from("Server ID is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if server_id.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Server ID cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let server_info = ServerInfo {
            address: self.address,
            port,
            prefix,
            server_id,
        };

        let url = server_info.redirect_url();
        if let Err(e) = Url::parse(&url) {
            return Err(ModelError::Validation {
                message: format!("Invalid server URL {url}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(server_info)
    }
}
