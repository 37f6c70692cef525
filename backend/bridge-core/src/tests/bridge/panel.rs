use crate::bridge::{ExportRequest, PanelBridge, PlotBridge};
use crate::config::ServerConfig;
use crate::error::bridge::BridgeError;
use crate::server::ServerOptions;
use crate::server::options::{PORT_OPTION, SERVER_ID_OPTION};
use crate::tests::StubFigure;

use models::{ExportFormat, FigureOptions, SizeHint};

use std::fs::{read_to_string, write};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

fn bridge() -> PanelBridge {
    PanelBridge::new(Arc::new(StubFigure::panel()))
}

/// **VALUE**: Verifies only HTML is exportable.
///
/// **WHY THIS MATTERS**: The host asks before exporting; a wrong `true` leads to a
/// failed export the user sees as a blank control.
///
/// **BUG THIS CATCHES**: Would catch case-insensitive or prefix format matching.
#[test]
fn given_formats_when_checking_can_export_then_only_html_is_supported() {
    let bridge = bridge();

    assert!(bridge.can_export(&ExportFormat::Html));
    assert!(!bridge.can_export(&ExportFormat::parse("png")));
    assert!(!bridge.can_export(&ExportFormat::parse("HTML")));
}

/// **VALUE**: Verifies an unsupported export has no side effects.
///
/// **WHY THIS MATTERS**: Rejecting a format must not leave a server running or
/// clobber the destination.
///
/// **BUG THIS CATCHES**: Would catch format validation after the server launch.
#[test]
fn given_png_format_when_exporting_then_fails_without_writing_file() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.png");

    // WHEN
    let result = bridge().export(ExportRequest::new("png", &path));

    // THEN
    assert!(matches!(
        result.err().unwrap(),
        BridgeError::UnsupportedFormat { .. }
    ));
    assert!(!path.exists());
}

/// **VALUE**: Verifies the size hint converts declared pixels to points.
///
/// **WHY THIS MATTERS**: The host sizes the cell-anchored control from it.
///
/// **BUG THIS CATCHES**: Would catch `dpi / 72` inverted arithmetic.
#[test]
fn given_declared_size_when_requesting_size_hint_then_scales_to_points() {
    // GIVEN: 400x300 figure
    let figure = StubFigure {
        options: FigureOptions::new(Some(400.0), Some(300.0)),
        ..StubFigure::panel()
    };
    let bridge = PanelBridge::new(Arc::new(figure));

    // WHEN / THEN
    assert_eq!(
        bridge.size_hint(96.0),
        Some(SizeHint {
            width: 300.0,
            height: 225.0
        })
    );
}

/// **VALUE**: Verifies no size hint is given when a dimension is missing.
///
/// **WHY THIS MATTERS**: The host falls back to its own default size.
///
/// **BUG THIS CATCHES**: Would catch treating a missing dimension as zero.
#[test]
fn given_missing_height_when_requesting_size_hint_then_returns_none() {
    let figure = StubFigure {
        options: FigureOptions::new(Some(400.0), None),
        ..StubFigure::panel()
    };

    assert_eq!(PanelBridge::new(Arc::new(figure)).size_hint(96.0), None);
}

/// **VALUE**: Verifies a successful export writes a redirect to the live server.
///
/// **WHY THIS MATTERS**: This is the whole display path for interactive panels.
///
/// **BUG THIS CATCHES**: Would catch writing the redirect before startup resolves
/// or with the requested (zero) port instead of the bound one.
#[test]
fn given_html_request_when_exporting_then_redirects_to_bound_port() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.html");
    let options = ServerOptions::new().with(SERVER_ID_OPTION, "redirected");

    // WHEN
    let teardown = bridge()
        .export(ExportRequest::new("html", &path).with_options(options))
        .unwrap();

    // THEN: Document points at a non-zero localhost port
    let document = read_to_string(&path).unwrap();
    assert!(document.contains("url='http://localhost:"));
    assert!(!document.contains("http://localhost:0'"));
    assert!(!teardown.is_spent());

    teardown.call();
    assert!(teardown.is_spent());
}

/// **VALUE**: Verifies configured defaults reach the server when the caller is silent.
///
/// **WHY THIS MATTERS**: Users pin the address in `holoviz.json` for remote hosts.
///
/// **BUG THIS CATCHES**: Would catch the config defaults being dropped.
#[test]
fn given_configured_address_when_exporting_then_redirect_uses_it() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.html");
    let bridge = bridge().with_defaults(ServerConfig {
        address: Some(String::from("127.0.0.1")),
        port: None,
    });

    // WHEN
    let teardown = bridge.export(ExportRequest::new("html", &path)).unwrap();

    // THEN
    let document = read_to_string(&path).unwrap();
    assert!(document.contains("url='http://127.0.0.1:"));
    teardown.call();
}

/// **VALUE**: Verifies a startup failure leaves the destination untouched.
///
/// **WHY THIS MATTERS**: A redirect to a dead server is worse than the host's own
/// error display.
///
/// **BUG THIS CATCHES**: Would catch writing the document before startup completes.
#[test]
fn given_port_in_use_when_exporting_then_no_document_is_written() {
    // GIVEN: Destination with old content and an occupied port
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.html");
    write(&path, "previous").unwrap();
    let blocker = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = blocker.local_addr().unwrap().port();

    // WHEN
    let result = bridge()
        .with_timeout(Duration::from_secs(5))
        .export(ExportRequest::new("html", &path).with_options(
            ServerOptions::new().with(PORT_OPTION, port),
        ));

    // THEN
    assert!(matches!(
        result.err().unwrap(),
        BridgeError::StartupFailure { .. }
    ));
    assert_eq!(read_to_string(&path).unwrap(), "previous");
}

/// **VALUE**: Verifies a redirect write failure is reported and the server stopped.
///
/// **WHY THIS MATTERS**: The server must not outlive an export the host never sees;
/// nothing else holds a handle that could stop it.
///
/// **BUG THIS CATCHES**: Would catch returning the error without stopping the
/// server, which keeps the port bound for the rest of the process.
#[test]
fn given_unwritable_destination_when_exporting_then_stops_server_and_returns_write_error() {
    // GIVEN: A free fixed port and a destination inside a missing directory
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("panel.html");
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    // WHEN
    let result = bridge().export(
        ExportRequest::new("html", &path)
            .with_options(ServerOptions::new().with(PORT_OPTION, port)),
    );

    // THEN: Write error, and the port is free again on return
    assert!(matches!(result.err().unwrap(), BridgeError::Write { .. }));
    assert!(TcpListener::bind(("127.0.0.1", port)).is_ok());
}
