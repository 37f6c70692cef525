use crate::bridge::redirect::{render_redirect, write_redirect};
use crate::error::bridge::BridgeError;

use std::fs::{read_to_string, write};

use tempfile::TempDir;

const URL: &str = "http://localhost:5006/panel";

/// **VALUE**: Verifies the document refreshes immediately and has a fallback link.
///
/// **WHY THIS MATTERS**: Some host browser controls ignore meta refresh.
///
/// **BUG THIS CATCHES**: Would catch a non-zero refresh delay or a missing link.
#[test]
fn given_url_when_rendering_redirect_then_contains_refresh_and_link() {
    let document = render_redirect(URL);

    assert!(document.contains(r#"<meta http-equiv="refresh" content="0; url='http://localhost:5006/panel'" />"#));
    assert!(document.contains(r#"<a href="http://localhost:5006/panel">link to http://localhost:5006/panel</a>"#));
    assert!(!document.contains("{url}"));
}

/// **VALUE**: Verifies writing truncates previous content.
///
/// **WHY THIS MATTERS**: The host reuses the same destination for re-exports.
///
/// **BUG THIS CATCHES**: Would catch appending to an existing file.
#[test]
fn given_existing_file_when_writing_redirect_then_replaces_content() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("redirect.html");
    write(&path, "x".repeat(4096)).unwrap();

    // WHEN
    write_redirect(&path, URL).unwrap();

    // THEN
    assert_eq!(read_to_string(&path).unwrap(), render_redirect(URL));
}

/// **VALUE**: Verifies unwritable paths surface as `Write` errors.
///
/// **BUG THIS CATCHES**: Would catch panics on I/O failure.
#[test]
fn given_directory_path_when_writing_redirect_then_returns_write_error() {
    let dir = TempDir::new().unwrap();

    let result = write_redirect(dir.path(), URL);

    assert!(matches!(result, Err(BridgeError::Write { .. })));
}
