use crate::helpers::StaticFigure;

use bridge_core::bridge::{BridgeRegistry, ExportRequest, PlotBridge};
use bridge_core::config::ServerConfig;
use bridge_core::error::bridge::BridgeError;

use std::fs::read_to_string;
use std::sync::Arc;

use tempfile::TempDir;

/// **VALUE**: Verifies hvPlot figures are exported as a static snapshot.
///
/// **WHY THIS MATTERS**: Static plots must not spin up servers.
///
/// **BUG THIS CATCHES**: Would catch hvPlot types being routed to the panel bridge.
#[test]
fn given_hvplot_figure_when_exported_then_writes_snapshot() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.html");
    let registry = BridgeRegistry::with_defaults(ServerConfig::default()).unwrap();
    let figure = StaticFigure {
        type_name: "hvplot.plotting.core.hvPlot",
        html: String::from("<svg></svg>"),
    };

    // WHEN
    let bridge = registry.create(Arc::new(figure)).unwrap();
    let teardown = bridge.export(ExportRequest::new("html", &path)).unwrap();

    // THEN
    assert_eq!(read_to_string(&path).unwrap(), "<svg></svg>");
    teardown.call();
    teardown.call();
}

/// **VALUE**: Verifies the static bridge also rejects non-HTML formats.
#[test]
fn given_svg_format_when_exported_then_returns_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.svg");
    let registry = BridgeRegistry::with_defaults(ServerConfig::default()).unwrap();
    let figure = StaticFigure {
        type_name: "holoviews.element.chart.Curve",
        html: String::new(),
    };
    let bridge = registry.create(Arc::new(figure)).unwrap();

    let result = bridge.export(ExportRequest::new("svg", &path));

    assert!(matches!(result, Err(BridgeError::UnsupportedFormat { .. })));
    assert!(!bridge.can_export(&"svg".into()));
    assert!(!path.exists());
}
