//! Keyword-argument marshaling for the `hvplot` worksheet function.
//!
//! Worksheet functions receive options twice over: as a dictionary argument
//! and as trailing `key, value, key, value, ...` arguments. Both are merged
//! into one mapping before it is handed to the plotting library.

use crate::error::kwargs::KwargsError;

use common::ErrorLocation;

use std::panic::Location;

use log::trace;
use serde_json::{Map, Value};

pub type Kwargs = Map<String, Value>;

/// Plots fill their cell-anchored control unless told otherwise.
pub const RESPONSIVE_KWARG: &str = "responsive";

/// Merge trailing key/value arguments into `kwargs`.
///
/// - `null` keys are skipped along with their value
/// - non-string keys are stringified
/// - 2-D ranges (arrays of arrays) are flattened row by row
/// - pair values override entries already in `kwargs`
/// - `responsive` defaults to `true`
///
/// # Errors
///
/// Returns [`KwargsError::MismatchedPairs`] if `kv_pairs` has odd length.
#[track_caller]
pub fn merge_kwargs(kwargs: Option<Kwargs>, kv_pairs: &[Value]) -> Result<Kwargs, KwargsError> {
    if kv_pairs.len() % 2 != 0 {
        return Err(KwargsError::MismatchedPairs {
            message: format!(
                "Mismatched key value pairs (should be an even number, got {})",
                kv_pairs.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let mut merged = kwargs.unwrap_or_default();

    for pair in kv_pairs.chunks_exact(2) {
        let key = match &pair[0] {
            Value::Null => {
                trace!("Skipping value with missing key");
                continue;
            }
            Value::String(key) => key.clone(),
            other => other.to_string(),
        };

        merged.insert(key, flatten_range(pair[1].clone()));
    }

    merged
        .entry(RESPONSIVE_KWARG)
        .or_insert(Value::Bool(true));

    Ok(merged)
}

fn flatten_range(value: Value) -> Value {
    match value {
        Value::Array(rows) if rows.iter().any(Value::is_array) => {
            let mut flat = Vec::new();
            for row in rows {
                match row {
                    Value::Array(cells) => flat.extend(cells),
                    cell => flat.push(cell),
                }
            }
            Value::Array(flat)
        }
        other => other,
    }
}
