use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::{
    auth::Credentials,
    errors::Error,
    models::{CommentItem, DateWindow, Identity, Page, ReviewItem},
    transport::{build_client, send_json},
    ReviewContributionFetcher,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// The public GitHub GraphQL endpoint.
pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Number of review contributions requested per page.
pub const REVIEW_PAGE_SIZE: u32 = 100;

const GITHUB_PREVIEW_ACCEPT: &str = "application/vnd.github.vixen-preview+json";

const REVIEW_CONTRIBUTIONS_QUERY: &str = r#"
query ($gh_user: String!, $gh_org_id: ID!, $from: DateTime!, $to: DateTime!, $after_cursor: String) {
  user(login: $gh_user) {
    contributionsCollection(from: $from, to: $to, organizationID: $gh_org_id) {
      pullRequestReviewContributions(first: 100, orderBy: { direction: ASC }, after: $after_cursor) {
        pageInfo {
          hasNextPage
          endCursor
        }
        edges {
          cursor
          node {
            pullRequestReview {
              body
              createdAt
              url
              comments(first: 100) {
                nodes {
                  body
                  url
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ContributionsData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    pull_request_review_contributions: ReviewContributionConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewContributionConnection {
    page_info: PageInfo,
    edges: Option<Vec<ReviewContributionEdge>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReviewContributionEdge {
    cursor: String,
    node: ReviewContributionNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewContributionNode {
    pull_request_review: PullRequestReviewNode,
}

#[derive(Debug, Deserialize)]
struct PullRequestReviewNode {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    comments: Option<ReviewCommentConnection>,
}

#[derive(Debug, Deserialize)]
struct ReviewCommentConnection {
    nodes: Option<Vec<ReviewCommentNode>>,
}

#[derive(Debug, Deserialize)]
struct ReviewCommentNode {
    #[serde(default)]
    body: Option<String>,
}

impl From<PullRequestReviewNode> for ReviewItem {
    fn from(review: PullRequestReviewNode) -> Self {
        let comments = review
            .comments
            .and_then(|c| c.nodes)
            .unwrap_or_default()
            .into_iter()
            .map(|c| CommentItem::new(c.body.unwrap_or_default()))
            .collect();

        ReviewItem::new(review.body.unwrap_or_default(), comments)
    }
}

/// Reads the pull request reviews a user wrote from the GitHub GraphQL API.
///
/// Reviews are requested in ascending creation order, [`REVIEW_PAGE_SIZE`] at a
/// time. The cursor handed back in each [`Page`] is the `endCursor` GitHub
/// reports for the page, and it is only present while GitHub reports that
/// another page exists.
///
/// # Example
///
/// ```rust,no_run
/// use perf_review_developer_platforms::{
///     auth::Credentials,
///     github::{GitHubProvider, GITHUB_GRAPHQL_ENDPOINT},
///     models::{DateWindow, Identity},
///     ReviewContributionFetcher,
/// };
///
/// # async fn example() -> Result<(), perf_review_developer_platforms::errors::Error> {
/// let provider = GitHubProvider::new(
///     GITHUB_GRAPHQL_ENDPOINT,
///     Credentials::new("octocat", "ghp_token"),
///     None,
/// )?;
///
/// let window = DateWindow::new("2024-01-01T00:00:00Z", "2024-12-31T23:59:59Z");
/// let identity = Identity {
///     user: "octocat".to_string(),
///     organization: "github".to_string(),
///     organization_id: "MDEyOk9yZ2FuaXphdGlvbjk5MTk=".to_string(),
/// };
///
/// let first_page = provider
///     .fetch_review_contributions(None, &window, &identity)
///     .await?;
/// println!("{} reviews on the first page", first_page.items.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: reqwest::Client,
    credentials: Credentials,
    endpoint: String,
}

impl GitHubProvider {
    /// Creates a provider that sends its queries to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TransportError` if the HTTP client cannot be created.
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: build_client(timeout)?,
            credentials,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewContributionFetcher for GitHubProvider {
    #[instrument(skip(self, window, identity), fields(user = %identity.user, organization = %identity.organization))]
    async fn fetch_review_contributions(
        &self,
        cursor: Option<&str>,
        window: &DateWindow,
        identity: &Identity,
    ) -> Result<Page<ReviewItem>, Error> {
        debug!(cursor = cursor, "Fetching review contributions");

        let payload = json!({
            "query": REVIEW_CONTRIBUTIONS_QUERY,
            "variables": {
                "gh_user": identity.user,
                "gh_org_id": identity.organization_id,
                "from": window.from,
                "to": window.to,
                "after_cursor": cursor,
            }
        });

        let request = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.credentials.basic_authorization())
            .header(ACCEPT, GITHUB_PREVIEW_ACCEPT)
            .json(&payload);

        let response: GraphQLResponse<ContributionsData> = send_json(request).await?;

        let messages: Vec<String> = response
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();

        let Some(data) = response.data else {
            error!(
                errors = messages.join("; "),
                "GitHub returned no data for the review contributions query"
            );
            return Err(Error::MalformedResponse(format!(
                "GraphQL query returned no data: {}",
                messages.join("; ")
            )));
        };

        if !messages.is_empty() {
            error!(
                errors = messages.join("; "),
                "GitHub reported errors for the review contributions query"
            );
            return Err(Error::MalformedResponse(format!(
                "GraphQL query reported errors: {}",
                messages.join("; ")
            )));
        }

        let Some(user) = data.user else {
            error!("GitHub did not return the requested user");
            return Err(Error::MalformedResponse(format!(
                "No user found with login '{}'",
                identity.user
            )));
        };

        let connection = user
            .contributions_collection
            .pull_request_review_contributions;
        let edges = connection.edges.unwrap_or_default();
        let last_edge_cursor = edges.last().map(|e| e.cursor.clone());

        let next_cursor = if connection.page_info.has_next_page {
            match connection.page_info.end_cursor.or(last_edge_cursor) {
                Some(c) => Some(c),
                None => {
                    error!("GitHub reported a next page without a cursor to reach it");
                    return Err(Error::MalformedResponse(
                        "Next page reported without an end cursor".to_string(),
                    ));
                }
            }
        } else {
            None
        };

        let items: Vec<ReviewItem> = edges
            .into_iter()
            .map(|e| ReviewItem::from(e.node.pull_request_review))
            .collect();

        info!(
            count = items.len(),
            has_next_page = next_cursor.is_some(),
            "Fetched review contributions"
        );

        Ok(Page { items, next_cursor })
    }
}
