pub mod bridge;
pub mod config;
pub mod error;
pub mod kwargs;
pub mod server;
pub mod startup;


pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
