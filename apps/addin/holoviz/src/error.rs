use bridge_core::error::CoreError;
use bridge_core::error::bridge::BridgeError;
use bridge_core::error::config::ConfigError;
use bridge_core::error::kwargs::KwargsError;
use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors returned to the spreadsheet host.
///
/// The host only ever shows these as text, but the structured form and the
/// location are kept for the add-in's own log.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AddinError {
    /// Error from the add-in itself (logging, host integration)
    #[error("Addin Error: {message} {location}")]
    Addin {
        message: String,
        location: ErrorLocation,
    },

    /// Error from bridge-core operations (export, config, argument marshaling)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for AddinError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        AddinError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<BridgeError> for AddinError {
    #[track_caller]
    fn from(error: BridgeError) -> Self {
        AddinError::from(CoreError::from(error))
    }
}

impl From<ConfigError> for AddinError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        AddinError::from(CoreError::from(error))
    }
}

impl From<KwargsError> for AddinError {
    #[track_caller]
    fn from(error: KwargsError) -> Self {
        AddinError::from(CoreError::from(error))
    }
}
