use super::*;
use reqwest::StatusCode;
use std::error::Error as StdError;

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid credentials".to_string());

    // Test error message
    assert_eq!(
        error.to_string(),
        "Authentication failed: Invalid credentials"
    );

    // Test error source
    assert!(error.source().is_none());
}

#[test]
fn test_malformed_response_error() {
    let error = Error::MalformedResponse("missing field `results`".to_string());

    assert_eq!(
        error.to_string(),
        "Malformed response: missing field `results`"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_transport_error() {
    let error = Error::TransportError("connection refused".to_string());

    assert_eq!(error.to_string(), "Transport failure: connection refused");
    assert!(error.source().is_none());
}

#[test]
fn test_from_status_unauthorized_is_auth_error() {
    let error = Error::from_status(StatusCode::UNAUTHORIZED, "Bad credentials");

    match error {
        Error::AuthError(detail) => {
            assert!(detail.contains("401"));
            assert!(detail.contains("Bad credentials"));
        }
        other => panic!("Expected an authentication error, got {:?}", other),
    }
}

#[test]
fn test_from_status_forbidden_is_auth_error() {
    let error = Error::from_status(StatusCode::FORBIDDEN, "");

    assert!(matches!(error, Error::AuthError(_)));
}

#[test]
fn test_from_status_server_error_is_transport_error() {
    let error = Error::from_status(StatusCode::BAD_GATEWAY, "  ");

    match error {
        Error::TransportError(detail) => assert_eq!(detail, "502 Bad Gateway"),
        other => panic!("Expected a transport error, got {:?}", other),
    }
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
