use common::ErrorLocation;

use std::error::Error as StdError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BridgeError {
    #[error("Unsupported Format Error: {message} {location}")]
    UnsupportedFormat {
        message: String,
        location: ErrorLocation,
    },

    #[error("Startup Failure Error: {message} {location}")]
    StartupFailure {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error("Startup Timeout Error: {message} {location}")]
    StartupTimeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Write Error: {message} {location}")]
    Write {
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Render Error: {message} {location}")]
    Render {
        message: String,
        location: ErrorLocation,
    },

    #[error("Pattern Error: {message} {location}")]
    Pattern {
        message: String,
        location: ErrorLocation,
    },
}
