//! Shared fixtures for running the real platform providers against a local
//! mock server.
//!
//! A [`MockPlatforms`] instance serves both the GitHub GraphQL endpoint and the
//! Confluence search API, so a whole report can run against one server.

use std::sync::Once;
use std::time::Duration;

use perf_review_core::config::ReportRequest;
use perf_review_developer_platforms::{
    auth::Credentials,
    confluence::ConfluenceProvider,
    github::GitHubProvider,
    models::{DateWindow, Identity},
};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GRAPHQL_PATH: &str = "/graphql";

pub const SEARCH_PATH: &str = "/wiki/rest/api/content/search";

static LOGGING: Once = Once::new();

/// Sends test logs to the test harness output, filtered by `RUST_LOG`.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The request every scenario reports on.
pub fn report_request() -> ReportRequest {
    ReportRequest::new(
        DateWindow::new("2024-01-01T00:00:00Z", "2024-12-31T23:59:59Z"),
        Identity {
            user: "octocat".to_string(),
            organization: "github".to_string(),
            organization_id: "O_kgDOAAAAAQ".to_string(),
        },
    )
}

/// A review edge as returned by the contributions query.
pub fn review_edge(cursor: &str, body: &str, comments: &[&str]) -> Value {
    let nodes: Vec<Value> = comments.iter().map(|c| json!({ "body": c })).collect();

    json!({
        "cursor": cursor,
        "node": {
            "pullRequestReview": {
                "body": body,
                "comments": { "nodes": nodes }
            }
        }
    })
}

/// A page created by the current user with `likes` likes.
pub fn document(title: &str, likes: u64) -> Value {
    json!({
        "title": title,
        "metadata": { "likes": { "count": likes } }
    })
}

pub struct MockPlatforms {
    pub server: MockServer,
}

impl MockPlatforms {
    pub async fn start() -> Self {
        init_test_logging();
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn github(&self) -> GitHubProvider {
        GitHubProvider::new(
            format!("{}{}", self.server.uri(), GRAPHQL_PATH),
            Credentials::new("octocat", "ghp_token"),
            Some(Duration::from_secs(5)),
        )
        .expect("Failed to create the GitHub provider")
    }

    pub fn confluence(&self) -> ConfluenceProvider {
        ConfluenceProvider::new(
            self.server.uri(),
            Credentials::new("octocat@example.com", "atl_token"),
            Some(Duration::from_secs(5)),
        )
        .expect("Failed to create the Confluence provider")
    }

    /// Serves `pages` in order. Page `n` is only returned for the cursor that
    /// ends page `n - 1`, and each page is expected to be requested once.
    pub async fn mount_review_pages(&self, pages: Vec<Vec<Value>>) {
        let last = pages.len().saturating_sub(1);
        let mut after_cursor: Option<String> = None;

        for (index, edges) in pages.into_iter().enumerate() {
            let end_cursor = edges
                .last()
                .and_then(|edge| edge["cursor"].as_str())
                .map(str::to_string);

            self.mount_review_page(after_cursor.as_deref(), edges, index < last)
                .await;
            after_cursor = end_cursor;
        }
    }

    /// Serves one page of review contributions for `after_cursor`.
    pub async fn mount_review_page(
        &self,
        after_cursor: Option<&str>,
        edges: Vec<Value>,
        has_next_page: bool,
    ) {
        let end_cursor = edges.last().map(|edge| edge["cursor"].clone());

        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "variables": { "after_cursor": after_cursor }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "user": {
                        "contributionsCollection": {
                            "pullRequestReviewContributions": {
                                "pageInfo": {
                                    "hasNextPage": has_next_page,
                                    "endCursor": end_cursor,
                                },
                                "edges": edges,
                            }
                        }
                    }
                }
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answers the contributions query for `after_cursor` with `status`.
    pub async fn mount_review_failure(&self, after_cursor: Option<&str>, status: u16) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "variables": { "after_cursor": after_cursor }
            })))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_documents(&self, documents: Vec<Value>) {
        let size = documents.len();
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": documents,
                "start": 0,
                "limit": 1000,
                "size": size,
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_search_failure(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
