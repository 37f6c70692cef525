use crate::error::server::ServerError;
use crate::server::ServerOptions;
use crate::server::options::{ADDRESS_OPTION, PORT_OPTION, PREFIX_OPTION, SERVER_ID_OPTION};
use crate::server::panel::{PanelServer, bind_host, normalize_prefix, validate_prefix};
use crate::tests::StubFigure;

use std::sync::Arc;

fn build(options: &ServerOptions) -> Result<PanelServer, ServerError> {
    PanelServer::new(Arc::new(StubFigure::panel()), options)
}

/// **VALUE**: Verifies prefixes are normalised to a single leading slash.
///
/// **WHY THIS MATTERS**: The redirect URL appends the prefix directly after the port.
///
/// **BUG THIS CATCHES**: Would catch `http://host:1//panel` or `http://host:1panel`.
#[test]
fn given_prefix_variants_when_normalized_then_single_leading_slash() {
    assert_eq!(normalize_prefix(""), "");
    assert_eq!(normalize_prefix("/"), "");
    assert_eq!(normalize_prefix("panel"), "/panel");
    assert_eq!(normalize_prefix("/panel/"), "/panel");
    assert_eq!(normalize_prefix("a/b"), "/a/b");
}

/// **VALUE**: Verifies a non-numeric port is rejected at construction.
///
/// **WHY THIS MATTERS**: Construction happens on the worker; errors there must become
/// a clean startup failure rather than a bind to a surprising port.
///
/// **BUG THIS CATCHES**: Would catch silently defaulting bad ports to 0.
#[test]
fn given_invalid_port_when_constructing_then_returns_config_error() {
    // GIVEN
    let options = ServerOptions::new()
        .with(SERVER_ID_OPTION, "abc")
        .with(PORT_OPTION, "not-a-port");

    // WHEN / THEN
    assert!(matches!(build(&options), Err(ServerError::Config { .. })));
}

/// **VALUE**: Verifies out-of-range ports are rejected.
///
/// **WHY THIS MATTERS**: `70000` would otherwise wrap when narrowed to `u16`.
///
/// **BUG THIS CATCHES**: Would catch `as u16` casts.
#[test]
fn given_out_of_range_port_when_constructing_then_returns_config_error() {
    // GIVEN
    let options = ServerOptions::new()
        .with(SERVER_ID_OPTION, "abc")
        .with(PORT_OPTION, 70000);

    // WHEN / THEN
    assert!(matches!(build(&options), Err(ServerError::Config { .. })));
}

/// **VALUE**: Verifies a non-string address is rejected.
///
/// **WHY THIS MATTERS**: The address ends up in the redirect URL.
///
/// **BUG THIS CATCHES**: Would catch `{"address": 1}` producing `http://1:port`.
#[test]
fn given_numeric_address_when_constructing_then_returns_config_error() {
    // GIVEN
    let options = ServerOptions::new()
        .with(SERVER_ID_OPTION, "abc")
        .with(ADDRESS_OPTION, 1);

    // WHEN / THEN
    assert!(matches!(build(&options), Err(ServerError::Config { .. })));
}

/// **VALUE**: Verifies the server id is required.
///
/// **WHY THIS MATTERS**: The bridge always supplies one; its absence means the
/// reserved option handling was bypassed.
///
/// **BUG THIS CATCHES**: Would catch servers starting anonymously.
#[test]
fn given_missing_server_id_when_constructing_then_returns_config_error() {
    // GIVEN
    let options = ServerOptions::new().with(PREFIX_OPTION, "/panel");

    // WHEN / THEN
    match build(&options) {
        Err(ServerError::Config { message, .. }) => assert!(message.contains("server_id")),
        Err(other) => panic!("Unexpected error: {other}"),
        Ok(_) => panic!("Expected config error"),
    }
}

/// **VALUE**: Verifies construction accepts pass-through options it does not know.
///
/// **WHY THIS MATTERS**: Hosts forward arbitrary server kwargs.
///
/// **BUG THIS CATCHES**: Would catch strict option parsing.
#[test]
fn given_unknown_options_when_constructing_then_succeeds() {
    // GIVEN
    let options = ServerOptions::new()
        .with(SERVER_ID_OPTION, "abc")
        .with("websocket_max_message_size", 1024);

    // WHEN / THEN
    assert!(build(&options).is_ok());
}

/// **VALUE**: Verifies prefixes the router would read as parameters are rejected.
///
/// **WHY THIS MATTERS**: Route registration panics on `:id`, `*rest` and unbalanced
/// braces, and that panic kills the worker before it can report why. `{x}` would
/// silently turn the prefix into a capture.
///
/// **BUG THIS CATCHES**: Would catch caller prefixes reaching the router unchecked.
#[test]
fn given_parameter_like_prefixes_when_constructing_then_returns_config_error() {
    for prefix in [":id", "/panel/:id", "/*rest", "/{x", "/{x}", "a}b", "/p?q=1", "/p#top"] {
        // GIVEN
        let options = ServerOptions::new()
            .with(SERVER_ID_OPTION, "abc")
            .with(PREFIX_OPTION, prefix);

        // WHEN
        let result = build(&options);

        // THEN
        match result {
            Err(ServerError::Config { message, .. }) => {
                assert!(message.contains(PREFIX_OPTION), "{prefix}: {message}");
            }
            Err(other) => panic!("{prefix}: unexpected error {other}"),
            Ok(_) => panic!("{prefix}: expected config error"),
        }
    }
}

/// **VALUE**: Verifies literal prefixes with colons or stars inside a segment pass.
///
/// **BUG THIS CATCHES**: Would catch over-eager rejection of ordinary paths.
#[test]
fn given_literal_prefixes_when_validating_then_normalizes() {
    assert_eq!(validate_prefix("dash:board").unwrap(), "/dash:board");
    assert_eq!(validate_prefix("/a/b*/").unwrap(), "/a/b*");
    assert_eq!(validate_prefix("/").unwrap(), "");
}

/// **VALUE**: Verifies the bind host strips IPv6 brackets and falls back to loopback.
///
/// **WHY THIS MATTERS**: `[::1]` is how users write IPv6 in URLs, but the socket
/// API wants the bare literal.
///
/// **BUG THIS CATCHES**: Would catch binding `[::1]` verbatim, which fails to resolve.
#[test]
fn given_addresses_when_resolving_bind_host_then_strips_brackets() {
    assert_eq!(bind_host(None), "127.0.0.1");
    assert_eq!(bind_host(Some("")), "127.0.0.1");
    assert_eq!(bind_host(Some("[::1]")), "::1");
    assert_eq!(bind_host(Some("::1")), "::1");
    assert_eq!(bind_host(Some("0.0.0.0")), "0.0.0.0");
}

/// **VALUE**: Verifies a numeric server id is stringified rather than rejected.
///
/// **BUG THIS CATCHES**: Would catch the id being treated as missing.
#[test]
fn given_numeric_server_id_when_constructing_then_succeeds() {
    let options = ServerOptions::new().with(SERVER_ID_OPTION, 42);

    assert!(build(&options).is_ok());
}
