use bridge_core::error::CoreError;
use bridge_core::error::bridge::BridgeError;
use bridge_core::error::server::ServerError;
use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;

/// **VALUE**: Verifies `BridgeError::StartupFailure` shows location and keeps its cause.
///
/// **WHY THIS MATTERS**: Startup failures happen on a worker thread; the caller only
/// sees what survives the hop.
///
/// **BUG THIS CATCHES**: Would catch if someone:
/// - Drops the `#[source]` attribute so the cause chain ends early
/// - Breaks the Display implementation to not include location
#[test]
fn given_startup_failure_when_formatted_then_includes_location_and_source() {
    // GIVEN
    let cause = ServerError::Bind {
        message: String::from("Failed to bind 127.0.0.1:80"),
        location: ErrorLocation::from(Location::caller()),
        source: IoError::new(ErrorKind::PermissionDenied, "permission denied"),
    };
    let err = BridgeError::StartupFailure {
        message: cause.to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: Some(Box::new(cause)),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.starts_with("Startup Failure Error:"));
    assert!(error_string.contains("Failed to bind 127.0.0.1:80"));
    assert!(error_string.contains("bridge.rs"));

    let source = err.source().unwrap();
    assert!(source.to_string().starts_with("Bind Error:"));
    assert_eq!(source.source().unwrap().to_string(), "permission denied");
}

/// **VALUE**: Verifies `CoreError` displays the wrapped error unchanged.
///
/// **BUG THIS CATCHES**: Would catch a wrapper prefix on transparent variants.
#[test]
fn given_timeout_when_wrapped_in_core_error_then_display_is_transparent() {
    // GIVEN
    let err = BridgeError::StartupTimeout {
        message: String::from("Server did not start within 15s"),
        location: ErrorLocation::from(Location::caller()),
    };
    let expected = err.to_string();

    // WHEN
    let core: CoreError = err.into();

    // THEN
    assert_eq!(core.to_string(), expected);
    assert!(matches!(core, CoreError::Bridge(BridgeError::StartupTimeout { .. })));
}
