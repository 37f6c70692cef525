use crate::helpers::{StaticFigure, redirect_target};

use bridge_core::bridge::{BridgeRegistry, ExportRequest, PlotBridge, Teardown};
use bridge_core::config::ServerConfig;
use bridge_core::server::ServerOptions;
use bridge_core::server::options::{ADDRESS_OPTION, PREFIX_OPTION, SERVER_ID_OPTION};

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

// ============================================================================
// Public API tests for interactive export
// These drive the bridge exactly as the host does and fetch the served page
// ============================================================================

fn export(html: &str, path: &Path, options: ServerOptions) -> Teardown {
    let registry = BridgeRegistry::with_defaults(ServerConfig::default()).unwrap();
    let bridge = registry
        .create(Arc::new(StaticFigure::panel(html)))
        .unwrap();

    bridge
        .export(ExportRequest::new("html", path).with_options(options))
        .unwrap()
}

fn target(path: &Path) -> String {
    let document = read_to_string(path).unwrap();
    redirect_target(&document).unwrap().to_string()
}

/// **VALUE**: Verifies the redirect leads to a server that serves the figure.
///
/// **WHY THIS MATTERS**: This is exactly what the host's browser control does after
/// an export: load the file, follow the refresh, render the panel.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Export returning before the server accepts connections
/// - The redirect pointing at the requested port instead of the bound one
/// - Routes not mounted at the root
#[tokio::test]
async fn given_exported_panel_when_following_redirect_then_serves_figure_html() {
    // GIVEN: An exported panel
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.html");
    let teardown = export("<div id='panel'>live</div>", &path, ServerOptions::new());

    // WHEN: Following the redirect
    let url = target(&path);
    let response = reqwest::get(&url).await.unwrap();

    // THEN: The figure's HTML comes back
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "<div id='panel'>live</div>");

    teardown.call();
}

/// **VALUE**: Verifies the redirect URL is built from address, port and prefix exactly.
///
/// **WHY THIS MATTERS**: Hosts on remote desktops pin the address; reverse proxies
/// require the prefix.
///
/// **BUG THIS CATCHES**: Would catch a doubled slash or a dropped prefix.
#[tokio::test]
async fn given_address_and_prefix_when_exporting_then_redirect_uses_both() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.html");
    let options = ServerOptions::new()
        .with(ADDRESS_OPTION, "127.0.0.1")
        .with(PREFIX_OPTION, "/holoviz")
        .with(SERVER_ID_OPTION, "prefixed");

    // WHEN
    let teardown = export("<p>prefixed</p>", &path, options);

    // THEN: http://127.0.0.1:{port}/holoviz
    let url = target(&path);
    let rest = url.strip_prefix("http://127.0.0.1:").unwrap();
    let (port, prefix) = rest.split_at(rest.find('/').unwrap());
    assert!(port.parse::<u16>().unwrap() > 0);
    assert_eq!(prefix, "/holoviz");

    let body = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert_eq!(body, "<p>prefixed</p>");

    let health = reqwest::get(format!("{url}/health")).await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");

    teardown.call();
}

/// **VALUE**: Verifies teardown stops the server and can be called twice.
///
/// **WHY THIS MATTERS**: Every export leaks a server until the host tears it down.
///
/// **BUG THIS CATCHES**: Would catch teardown returning before the socket closes, or
/// panicking on a second call.
#[tokio::test]
async fn given_exported_panel_when_torn_down_twice_then_connections_are_refused() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.html");
    let teardown = export("<p>bye</p>", &path, ServerOptions::new());
    let url = target(&path);
    assert!(reqwest::get(&url).await.is_ok());

    // WHEN
    teardown.call();
    teardown.call();

    // THEN
    assert!(reqwest::get(&url).await.is_err());
}

/// **VALUE**: Verifies concurrent exports each get their own server.
///
/// **WHY THIS MATTERS**: A workbook may show several panels; servers are never shared.
///
/// **BUG THIS CATCHES**: Would catch global server state or port reuse.
#[tokio::test]
async fn given_three_exports_when_running_concurrently_then_each_has_own_port() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let exports: Vec<(Teardown, String)> = (0..3)
        .map(|i| {
            let path = dir.path().join(format!("panel-{i}.html"));
            let teardown = export(&format!("<p>{i}</p>"), &path, ServerOptions::new());
            (teardown, target(&path))
        })
        .collect();

    // THEN: Distinct URLs, each serving its own figure
    let urls: HashSet<&str> = exports.iter().map(|(_, url)| url.as_str()).collect();
    assert_eq!(urls.len(), 3);

    for (i, (_, url)) in exports.iter().enumerate() {
        let body = reqwest::get(url).await.unwrap().text().await.unwrap();
        assert_eq!(body, format!("<p>{i}</p>"));
    }

    for (teardown, _) in &exports {
        teardown.call();
    }
}
