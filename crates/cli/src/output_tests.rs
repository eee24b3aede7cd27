use super::*;
use perf_review_core::documents::SignificantDocument;
use perf_review_developer_platforms::models::{DateWindow, Identity};

fn summary(contributions: Option<Tally>, documents: Option<DocumentSummary>) -> Summary {
    Summary {
        identity: Identity {
            user: "octocat".to_string(),
            organization: "github".to_string(),
            organization_id: "O_kgDOAAAAAQ".to_string(),
        },
        window: DateWindow::new("2024-01-01", "2024-12-31"),
        contributions,
        documents,
    }
}

#[test]
fn test_text_with_contributions_only() {
    let text = render_text(&summary(
        Some(Tally {
            total_reviews: 12,
            total_comments: 30,
            suggestion_count: 4,
            long_count: 3,
            very_long_count: 1,
        }),
        None,
    ));

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "~~~~~~~~~~");
    assert_eq!(lines[1], "Hello octocat");
    assert_eq!(lines[2], "From 2024-01-01 to 2024-12-31");
    assert_eq!(lines[3], "You've made 12 PR reviews in github with 30 comments");
    assert_eq!(
        lines[4],
        "There are 4 comments in good quality, 3 are short-form and 1 are long-form"
    );
    assert_eq!(lines[5], "Keep it up, review code better 💪💪💪");
    assert_eq!(*lines.last().unwrap(), "~~~~~~~~~~");
    assert!(!text.contains("confluence"));
}

#[test]
fn test_text_with_documents_only() {
    let text = render_text(&summary(
        None,
        Some(DocumentSummary {
            total_count: 5,
            total_likes: 21,
            significant: SignificantDocument {
                best_like_count: 9,
                best_title: Some("Design: search".to_string()),
            },
        }),
    ));

    assert!(text.contains("You've made 5 confluence pages with total 21 likes"));
    assert!(text.contains("> The most liked page is Design: search with 9 likes"));
    assert!(text.contains("Keep it up, write more proposals or knowledge pages 📝✍️"));
    assert!(!text.contains("PR reviews"));
}

#[test]
fn test_text_without_liked_document() {
    let text = render_text(&summary(None, Some(DocumentSummary::default())));

    assert!(text.contains("You've made 0 confluence pages with total 0 likes"));
    assert!(text.contains("> None of your pages received a like yet"));
}

#[test]
fn test_json_output() {
    let json = render(&summary(Some(Tally::default()), None), OutputFormat::Json)
        .expect("Failed to render JSON");

    let parsed: serde_json::Value = serde_json::from_str(&json).expect("Output should be JSON");
    assert_eq!(parsed["identity"]["user"], "octocat");
    assert_eq!(parsed["contributions"]["total_reviews"], 0);
    assert!(parsed["documents"].is_null());
}

#[test]
fn test_default_format_is_text() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}
