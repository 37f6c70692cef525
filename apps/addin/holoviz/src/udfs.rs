//! Worksheet functions.

use crate::error::AddinError;

use bridge_core::kwargs::{Kwargs, merge_kwargs};

use log::debug;
use serde_json::Value;

pub const HVPLOT_FUNCTION_NAME: &str = "hvplot";
pub const FUNCTION_CATEGORY: &str = "Holoviz";

/// `=hvplot(df, kwargs, key, value, ...)`
///
/// Resolves the keyword arguments the plotting library is called with. For
/// `=hvplot(A1, {"kind", "scatter"}, "y", {"v1", "v2"})` that is
/// `{"kind": "scatter", "y": ["v1", "v2"], "responsive": true}`.
///
/// # Errors
///
/// Returns [`AddinError::Core`] when the trailing arguments do not pair up.
pub fn hvplot(kwargs: Option<Kwargs>, kv_pairs: &[Value]) -> Result<Kwargs, AddinError> {
    let merged = merge_kwargs(kwargs, kv_pairs)?;
    debug!("{HVPLOT_FUNCTION_NAME} resolved {} keyword argument(s)", merged.len());
    Ok(merged)
}
