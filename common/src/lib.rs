//! Shared primitives for the holoviz bridge workspace.
//!
//! Every error type in the workspace records where it was raised through
//! [`ErrorLocation`], so a failure surfaced to the spreadsheet host still
//! points at the exact line in the bridge that produced it.

pub mod error;

pub use error::error_location::ErrorLocation;
