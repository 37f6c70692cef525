//! Static document that sends the host's browser control to a live server.

use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::fs::write;
use std::panic::Location;
use std::path::Path;

const URL_PLACEHOLDER: &str = "{url}";

const REDIRECT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta http-equiv="refresh" content="0; url='{url}'" />
</head>
<body>
    <p>If you are not redirected automatically, follow this <a href="{url}">link to {url}</a>.</p>
</body>
</html>
"#;

pub fn render_redirect(url: &str) -> String {
    REDIRECT_TEMPLATE.replace(URL_PLACEHOLDER, url)
}

/// Write the redirect document as UTF-8, replacing any existing content.
#[track_caller]
pub fn write_redirect(path: &Path, url: &str) -> Result<(), BridgeError> {
    write(path, render_redirect(url)).map_err(|e| BridgeError::Write {
        message: format!("Failed to write redirect to {}: {e}", path.display()),
        location: ErrorLocation::from(Location::caller()),
        source: e,
    })
}
