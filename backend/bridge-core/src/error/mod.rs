pub mod bridge;
pub mod config;
pub mod kwargs;
pub mod server;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Bridge(#[from] bridge::BridgeError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Kwargs(#[from] kwargs::KwargsError),
}
