use super::*;
use anyhow::anyhow;
use std::process::{ExitCode, Termination};

#[test]
fn test_config_error_display() {
    let err = CliError::ConfigError("bad config".to_string());
    assert_eq!(format!("{}", err), "Configuration error: bad config");
}

#[test]
fn test_auth_error_display() {
    let err = CliError::AuthError("bad auth".to_string());
    assert_eq!(format!("{}", err), "Authentication error: bad auth");
}

#[test]
fn test_network_error_display() {
    let err = CliError::NetworkError("net fail".to_string());
    assert_eq!(format!("{}", err), "Network error: net fail");
}

#[test]
fn test_invalid_arguments_display() {
    let err = CliError::InvalidArguments("bad arg".to_string());
    assert_eq!(format!("{}", err), "Invalid arguments: bad arg");
}

#[test]
fn test_malformed_response_display() {
    let err = CliError::MalformedResponse("missing field".to_string());
    assert_eq!(format!("{}", err), "Unexpected response: missing field");
}

#[test]
fn test_other_error_display() {
    let err = CliError::Other("other".to_string());
    assert_eq!(format!("{}", err), "Error: other");
}

#[test]
fn test_from_anyhow_error_keeps_context() {
    let err: CliError = anyhow!("root cause").context("outer").into();
    match err {
        CliError::Other(message) => assert_eq!(message, "outer: root cause"),
        other => panic!("Expected CliError::Other, got {:?}", other),
    }
}

#[test]
fn test_from_review_errors() {
    assert!(matches!(
        CliError::from(ReviewError::Auth("401".to_string())),
        CliError::AuthError(_)
    ));
    assert!(matches!(
        CliError::from(ReviewError::Transport("reset".to_string())),
        CliError::NetworkError(_)
    ));
    assert!(matches!(
        CliError::from(ReviewError::MalformedResponse("eof".to_string())),
        CliError::MalformedResponse(_)
    ));
    assert!(matches!(
        CliError::from(ReviewError::PageLimitExceeded(3)),
        CliError::Other(_)
    ));

    match CliError::from(ReviewError::MissingConfiguration("window.from".to_string())) {
        CliError::ConfigError(message) => assert_eq!(message, "Missing value for window.from"),
        other => panic!("Expected CliError::ConfigError, got {:?}", other),
    }
}

#[test]
fn test_exit_codes_are_distinct() {
    let codes = [
        CliError::ConfigError(String::new()).report(),
        CliError::AuthError(String::new()).report(),
        CliError::NetworkError(String::new()).report(),
        CliError::InvalidArguments(String::new()).report(),
        CliError::MalformedResponse(String::new()).report(),
        CliError::Other(String::new()).report(),
    ];

    let expected = [
        ExitCode::from(2),
        ExitCode::from(3),
        ExitCode::from(4),
        ExitCode::from(5),
        ExitCode::from(6),
        ExitCode::FAILURE,
    ];
    for (code, expected) in codes.iter().zip(expected.iter()) {
        assert_eq!(format!("{:?}", code), format!("{:?}", expected));
    }
}
