use super::*;

fn request() -> ReportRequest {
    ReportRequest::new(
        DateWindow::new("2024-01-01T00:00:00Z", "2024-12-31T23:59:59Z"),
        Identity {
            user: "octocat".to_string(),
            organization: "github".to_string(),
            organization_id: "O_kgDOAAAAAQ".to_string(),
        },
    )
}

#[test]
fn test_complete_request_is_valid() {
    let request = request();

    assert!(request.validate_window().is_ok());
    assert!(request.validate_identity().is_ok());
    assert_eq!(request.max_pages, None);
}

#[test]
fn test_missing_window_start_is_reported() {
    let mut request = request();
    request.window.from = String::new();

    match request.validate_window() {
        Err(ReviewError::MissingConfiguration(name)) => assert_eq!(name, "window.from"),
        other => panic!("Expected a missing configuration error, got {:?}", other),
    }
}

#[test]
fn test_blank_window_end_is_reported() {
    let mut request = request();
    request.window.to = "   ".to_string();

    match request.validate_window() {
        Err(ReviewError::MissingConfiguration(name)) => assert_eq!(name, "window.to"),
        other => panic!("Expected a missing configuration error, got {:?}", other),
    }
}

#[test]
fn test_window_format_is_not_validated() {
    let mut request = request();
    request.window = DateWindow::new("last tuesday", "not a date");

    assert!(request.validate_window().is_ok());
}

#[test]
fn test_missing_organization_id_is_reported() {
    let mut request = request();
    request.identity.organization_id = String::new();

    match request.validate_identity() {
        Err(ReviewError::MissingConfiguration(name)) => {
            assert_eq!(name, "identity.organization_id")
        }
        other => panic!("Expected a missing configuration error, got {:?}", other),
    }
}

#[test]
fn test_missing_user_is_reported_first() {
    let mut request = request();
    request.identity.user = String::new();
    request.identity.organization = String::new();

    match request.validate_identity() {
        Err(ReviewError::MissingConfiguration(name)) => assert_eq!(name, "identity.user"),
        other => panic!("Expected a missing configuration error, got {:?}", other),
    }
}

#[test]
fn test_with_max_pages() {
    let request = request().with_max_pages(NonZeroUsize::new(25).expect("non-zero"));

    assert_eq!(request.max_pages.map(NonZeroUsize::get), Some(25));
}

#[test]
fn test_zero_max_pages_is_rejected_when_deserializing() {
    let json = r#"{
        "window": { "from": "2024-01-01", "to": "2024-06-30" },
        "identity": { "user": "octocat", "organization": "github", "organization_id": "O_1" },
        "max_pages": 0
    }"#;

    assert!(serde_json::from_str::<ReportRequest>(json).is_err());
}

#[test]
fn test_max_pages_defaults_when_deserializing() {
    let json = r#"{
        "window": { "from": "2024-01-01", "to": "2024-06-30" },
        "identity": { "user": "octocat", "organization": "github", "organization_id": "O_1" }
    }"#;

    let request: ReportRequest = serde_json::from_str(json).expect("Failed to deserialize");

    assert_eq!(request.max_pages, None);
    assert_eq!(request.window.to, "2024-06-30");
}
