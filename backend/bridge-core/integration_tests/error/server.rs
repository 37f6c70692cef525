use bridge_core::error::server::ServerError;

use models::ServerInfoBuilder;

/// **VALUE**: Verifies invalid server info becomes a `Config` error on the server.
///
/// **WHY THIS MATTERS**: The worker builds `ServerInfo` after binding; a bad prefix
/// must fail startup rather than produce a broken redirect.
///
/// **BUG THIS CATCHES**: Would catch the model error's message being dropped.
#[test]
fn given_invalid_server_info_when_converted_then_becomes_config_error() {
    // GIVEN
    let model_error = ServerInfoBuilder::default()
        .with_port(5006)
        .with_prefix("panel")
        .with_server_id("abc")
        .build()
        .unwrap_err();

    // WHEN
    let err = ServerError::from(model_error);

    // THEN
    match err {
        ServerError::Config { message, .. } => assert!(message.contains("Prefix must start with '/'")),
        other => panic!("Unexpected error: {other}"),
    }
}
