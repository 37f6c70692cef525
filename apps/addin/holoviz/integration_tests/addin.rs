use bridge_core::bridge::{ExportRequest, Figure, RenderError};
use bridge_core::config::AddinConfig;
use holoviz_addin::Addin;
use holoviz_addin::error::AddinError;

use std::fs::{read_to_string, write};
use std::sync::Arc;

use tempfile::TempDir;

struct NamedFigure(&'static str);

impl Figure for NamedFigure {
    fn type_name(&self) -> &str {
        self.0
    }

    fn render_html(&self) -> Result<String, RenderError> {
        Ok(format!("<p>{}</p>", self.0))
    }
}

/// **VALUE**: Verifies a loaded add-in hands out the right bridge per figure type.
///
/// **WHY THIS MATTERS**: This is the lookup the host performs for every displayed object.
///
/// **BUG THIS CATCHES**: Would catch the registry not being built from config.
#[test]
fn given_loaded_addin_when_asking_for_bridges_then_matches_type_names() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let addin = Addin::load("5.9.0", dir.path()).unwrap();

    // WHEN / THEN
    assert!(addin.bridge_for(Arc::new(NamedFigure("panel.viewable.Viewer"))).is_some());
    assert!(addin.bridge_for(Arc::new(NamedFigure("hvplot.plotting.core.hvPlot"))).is_some());
    assert!(addin.bridge_for(Arc::new(NamedFigure("matplotlib.figure.Figure"))).is_none());
    assert_eq!(addin.modules().len(), 4);
    assert_eq!(addin.ribbon().len(), 1);
}

/// **VALUE**: Verifies configured server defaults flow through to panel exports.
///
/// **WHY THIS MATTERS**: `holoviz.json` is the only place users can pin the address.
///
/// **BUG THIS CATCHES**: Would catch the registry being built with default config.
#[test]
fn given_configured_address_when_exporting_panel_then_redirect_uses_it() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    write(
        dir.path().join("holoviz.json"),
        r#"{"version": 1, "ribbon": {"disable_ribbon": true}, "server": {"address": "127.0.0.1"}}"#,
    )
    .unwrap();
    let addin = Addin::load("5.9.0dev", dir.path()).unwrap();
    let path = dir.path().join("panel.html");

    // WHEN
    let bridge = addin
        .bridge_for(Arc::new(NamedFigure("panel.viewable.Viewable")))
        .unwrap();
    let teardown = bridge.export(ExportRequest::new("html", &path)).unwrap();

    // THEN
    assert!(read_to_string(&path).unwrap().contains("url='http://127.0.0.1:"));
    assert!(addin.ribbon().is_empty());
    teardown.call();
}

/// **VALUE**: Verifies an invalid config file fails loading with a core error.
///
/// **BUG THIS CATCHES**: Would catch parse errors being swallowed into defaults.
#[test]
fn given_malformed_config_when_loading_addin_then_returns_core_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path().join("holoviz.json"), "{").unwrap();

    let result = Addin::load("5.9.0", dir.path());

    match result {
        Err(AddinError::Core { message, .. }) => assert!(message.contains("holoviz.json")),
        Err(other) => panic!("Unexpected error: {other}"),
        Ok(_) => panic!("Expected config error"),
    }
}

/// **VALUE**: Verifies `Addin::new` validates configuration it is handed directly.
#[test]
fn given_invalid_config_when_creating_addin_then_fails() {
    let config = AddinConfig {
        version: 0,
        ..Default::default()
    };

    let result = Addin::new("5.9.0", config);

    assert!(matches!(result, Err(AddinError::Core { .. })));
}
