//! Output formats a host may request from a plot bridge.

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

const HTML_FORMAT: &str = "html";

/// Export format requested by the host.
///
/// Only [`ExportFormat::Html`] is ever exportable; anything else is kept
/// verbatim so the rejection message can name what was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Html,
    Other(String),
}

impl ExportFormat {
    /// Parse a host format string. Matching is exact: `"HTML"` is not `"html"`.
    pub fn parse(format: &str) -> Self {
        if format == HTML_FORMAT {
            ExportFormat::Html
        } else {
            ExportFormat::Other(format.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExportFormat::Html => HTML_FORMAT,
            ExportFormat::Other(other) => other,
        }
    }
}

impl From<&str> for ExportFormat {
    fn from(format: &str) -> Self {
        ExportFormat::parse(format)
    }
}

impl Display for ExportFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.as_str())
    }
}
