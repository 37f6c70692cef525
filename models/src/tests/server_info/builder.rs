use crate::{ModelError, ServerInfoBuilder};

/// **VALUE**: Verifies that builder validation rejects a missing port.
///
/// **WHY THIS MATTERS**: The port is the one value only known after the server
/// binds. A ServerInfo without it would produce a redirect the host cannot follow.
///
/// **BUG THIS CATCHES**: Would catch if the required-field check is removed and a
/// half-initialised ServerInfo escapes the worker thread.
#[test]
fn given_missing_port_when_building_then_returns_validation_error() {
    // GIVEN: Builder without a port
    let builder = ServerInfoBuilder::default().with_server_id("abc123");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Port is required");
        }
    }
}

/// **VALUE**: Verifies that builder validation rejects port zero.
///
/// **WHY THIS MATTERS**: Port 0 means "pick one for me" at bind time. Reporting it
/// back means the bound port was never read from the listener.
///
/// **BUG THIS CATCHES**: Would catch if the requested port is reported instead of
/// the bound one.
#[test]
fn given_zero_port_when_building_then_returns_validation_error() {
    // GIVEN: Builder with the ephemeral placeholder port
    let builder = ServerInfoBuilder::default()
        .with_port(0)
        .with_server_id("abc123");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Port must be non-zero");
        }
    }
}

/// **VALUE**: Verifies that a prefix without a leading slash is rejected.
///
/// **WHY THIS MATTERS**: The redirect URL is `http://host:port{prefix}`. A prefix of
/// `app` would produce `http://host:5006app`, which points at the wrong port.
///
/// **BUG THIS CATCHES**: Would catch if prefix validation is dropped.
#[test]
fn given_prefix_without_slash_when_building_then_returns_validation_error() {
    // GIVEN: Builder with a relative prefix
    let builder = ServerInfoBuilder::default()
        .with_port(5006)
        .with_prefix("app")
        .with_server_id("abc123");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should name the bad prefix
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert!(message.starts_with("Prefix must start with '/'"));
            assert!(message.contains("app"));
        }
    }
}

/// **VALUE**: Verifies that an empty server ID is rejected.
///
/// **WHY THIS MATTERS**: The server ID names the worker thread and appears in every
/// log line about the server. Empty IDs make concurrent exports indistinguishable.
///
/// **BUG THIS CATCHES**: Would catch if the bridge stops generating an ID.
#[test]
fn given_empty_server_id_when_building_then_returns_validation_error() {
    // GIVEN: Builder with an empty server id
    let builder = ServerInfoBuilder::default()
        .with_port(5006)
        .with_server_id("");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Server ID cannot be empty");
        }
    }
}

/// **VALUE**: Verifies that an address that cannot form a URL is rejected.
///
/// **WHY THIS MATTERS**: The address comes from pass-through server options typed
/// by users. A redirect document with an unparsable URL leaves the host on a
/// blank page.
///
/// **BUG THIS CATCHES**: Would catch if URL validation is removed from the builder.
#[test]
fn given_unparsable_address_when_building_then_returns_validation_error() {
    // GIVEN: Builder with whitespace in the address
    let builder = ServerInfoBuilder::default()
        .with_address(Some(String::from("not a host")))
        .with_port(5006)
        .with_server_id("abc123");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error mentioning the URL
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert!(message.starts_with("Invalid server URL"));
        }
    }
}

/// **VALUE**: Verifies the happy path populates every field.
///
/// **WHY THIS MATTERS**: Every successful export goes through this builder.
///
/// **BUG THIS CATCHES**: Would catch broken field assignments or a default prefix
/// other than empty.
#[test]
fn given_all_valid_fields_when_building_then_returns_server_info() {
    // GIVEN: Builder with port and id but no prefix
    let builder = ServerInfoBuilder::default()
        .with_address(Some(String::from("127.0.0.1")))
        .with_port(5006)
        .with_server_id("abc123");

    // WHEN: Building
    let server_info = builder.build().unwrap();

    // THEN: Fields are populated, prefix defaults to empty
    assert_eq!(server_info.address.as_deref(), Some("127.0.0.1"));
    assert_eq!(server_info.port, 5006);
    assert_eq!(server_info.prefix, "");
    assert_eq!(server_info.server_id, "abc123");
}
