//! Host-facing entry points of the holoviz spreadsheet add-in.
//!
//! The host calls [`entry::modules`] and [`entry::ribbon`] while loading the
//! add-in, [`udfs::hvplot`] from worksheet formulas, and [`Addin::bridge_for`]
//! whenever it needs to display a figure.

pub mod addin;
pub mod entry;
pub mod error;
pub mod logger;
pub mod udfs;

pub use addin::Addin;
