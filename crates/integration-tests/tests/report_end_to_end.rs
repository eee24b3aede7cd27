use perf_review_core::{
    contributions::Tally,
    documents::{DocumentSummary, SignificantDocument},
    errors::ReviewError,
    ReportDriver, Summary,
};
use perf_review_integration_tests::{document, report_request, review_edge, MockPlatforms};
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;

#[tokio::test]
async fn test_two_pages_of_reviews_are_tallied() {
    let platforms = MockPlatforms::start().await;
    platforms
        .mount_review_pages(vec![
            vec![review_edge("c0", "LGTM", &[])],
            vec![review_edge("c1", "Ship it", &[])],
        ])
        .await;

    let driver = ReportDriver::new(report_request());
    let tally = driver
        .contributions(&platforms.github())
        .await
        .expect("Contributions should be collected");

    assert_eq!(
        tally,
        Tally {
            total_reviews: 2,
            total_comments: 2,
            suggestion_count: 0,
            long_count: 0,
            very_long_count: 0,
        }
    );
}

#[tokio::test]
async fn test_full_report() {
    let long_comment = "a".repeat(300);
    let very_long_comment = format!("See https://example.com/guide {}", "b".repeat(600));

    let platforms = MockPlatforms::start().await;
    platforms
        .mount_review_pages(vec![
            vec![
                review_edge("c0", "", &["nit: naming", long_comment.as_str()]),
                review_edge("c1", "Please add tests", &[]),
            ],
            vec![review_edge(
                "c2",
                "",
                &[
                    "```suggestion\nlet total = 0;\n```",
                    very_long_comment.as_str(),
                ],
            )],
        ])
        .await;
    platforms
        .mount_documents(vec![
            document("Team charter", 3),
            document("RFC: caching", 11),
            document("Retro notes", 11),
            document("Scratch", 0),
        ])
        .await;

    let driver = ReportDriver::new(report_request());
    let summary = driver
        .run(&platforms.github(), &platforms.confluence())
        .await
        .expect("Report should succeed");

    let request = report_request();
    assert_eq!(
        summary,
        Summary {
            identity: request.identity,
            window: request.window,
            contributions: Some(Tally {
                total_reviews: 3,
                total_comments: 5,
                suggestion_count: 2,
                long_count: 2,
                very_long_count: 1,
            }),
            documents: Some(DocumentSummary {
                total_count: 4,
                total_likes: 25,
                significant: SignificantDocument {
                    best_like_count: 11,
                    best_title: Some("RFC: caching".to_string()),
                },
            }),
        }
    );
}

#[tokio::test]
async fn test_documents_without_likes() {
    let platforms = MockPlatforms::start().await;
    platforms
        .mount_documents(vec![document("Draft", 0), document("Notes", 0)])
        .await;

    let driver = ReportDriver::new(report_request());
    let summary = driver
        .documents(&platforms.confluence())
        .await
        .expect("Documents should be summarized");

    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.total_likes, 0);
    assert_eq!(summary.significant, SignificantDocument::default());
}

#[tokio::test]
async fn test_failure_on_a_later_page_aborts_the_run() {
    let platforms = MockPlatforms::start().await;
    platforms
        .mount_review_page(None, vec![review_edge("c0", "LGTM", &[])], true)
        .await;
    platforms.mount_review_failure(Some("c0"), 401).await;

    let driver = ReportDriver::new(report_request());
    let result = driver.contributions(&platforms.github()).await;

    assert!(matches!(result, Err(ReviewError::Auth(_))));
}

#[tokio::test]
async fn test_search_failure_aborts_the_report() {
    let platforms = MockPlatforms::start().await;
    platforms
        .mount_review_pages(vec![vec![review_edge("c0", "LGTM", &[])]])
        .await;
    platforms.mount_search_failure(503).await;

    let driver = ReportDriver::new(report_request());
    let result = driver
        .run(&platforms.github(), &platforms.confluence())
        .await;

    assert!(matches!(result, Err(ReviewError::Transport(_))));
}

#[tokio::test]
async fn test_page_limit_stops_a_runaway_cursor() {
    let platforms = MockPlatforms::start().await;
    platforms
        .mount_review_page(None, vec![review_edge("c0", "LGTM", &[])], true)
        .await;
    platforms
        .mount_review_page(Some("c0"), vec![review_edge("c1", "LGTM", &[])], true)
        .await;

    let driver = ReportDriver::new(report_request().with_max_pages(NonZeroUsize::new(2).expect("non-zero")));
    let result = driver.contributions(&platforms.github()).await;

    assert!(matches!(result, Err(ReviewError::PageLimitExceeded(2))));
}
