//! Domain models for the holoviz bridge.
//!
//! This crate contains pure data structures describing what the bridge
//! exchanges with the spreadsheet host and with its embedded server. Models
//! carry no threading or I/O - they're just data passed between layers.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **bridge-core**: Plot bridges, startup synchronization, embedded server
//! - **holoviz-addin**: Host entry points wiring everything together

pub mod error;
pub mod export_format;
pub mod figure_options;
pub mod server_info;

pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use export_format::ExportFormat;
pub use figure_options::{FigureOptions, SizeHint};
pub use server_info::ServerInfo;
pub use server_info::builder::ServerInfoBuilder;

/// Host name used in redirect URLs when the server reports no address.
pub const LOOPBACK_HOSTNAME: &str = "localhost";
