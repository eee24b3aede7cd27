//! Confluence content search.
//!
//! Documents are found with a single CQL query against the content search API.
//! The query is capped at [`SEARCH_LIMIT`] results and is not paginated.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::{
    auth::Credentials,
    errors::Error,
    models::{DateWindow, DocumentItem},
    transport::{build_client, send_json},
    DocumentSearcher,
};

#[cfg(test)]
#[path = "confluence_tests.rs"]
mod tests;

/// Maximum number of documents returned by a single search.
pub const SEARCH_LIMIT: u32 = 1000;

const SEARCH_PATH: &str = "/wiki/rest/api/content/search";

const SEARCH_EXPAND: &str = "metadata.properties,metadata.likes,history";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ContentResult>,
    #[serde(default, rename = "_links")]
    links: SearchLinks,
}

#[derive(Debug, Default, Deserialize)]
struct SearchLinks {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResult {
    title: String,
    metadata: ContentMetadata,
}

#[derive(Debug, Deserialize)]
struct ContentMetadata {
    likes: LikesMetadata,
}

#[derive(Debug, Deserialize)]
struct LikesMetadata {
    count: u64,
}

/// Builds the CQL that selects the pages the current user created in `window`.
pub fn created_pages_query(window: &DateWindow) -> String {
    format!(
        "(type=page and creator=currentUser() and created >= {} and created <= {})",
        window.from_date(),
        window.to_date()
    )
}

/// Searches the Confluence pages created by the authenticated user.
#[derive(Debug, Clone)]
pub struct ConfluenceProvider {
    base_url: String,
    client: reqwest::Client,
    credentials: Credentials,
}

impl ConfluenceProvider {
    /// Creates a provider for the site at `base_url`, e.g. `https://example.atlassian.net`.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
            credentials,
        })
    }

    /// Creates a provider for an Atlassian cloud domain, e.g. `example.atlassian.net`.
    pub fn for_domain(
        domain: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        Self::new(format!("https://{}", domain), credentials, timeout)
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

#[async_trait]
impl DocumentSearcher for ConfluenceProvider {
    #[instrument(skip(self), fields(user = self.credentials.username()))]
    async fn search_documents(&self, window: &DateWindow) -> Result<Vec<DocumentItem>, Error> {
        let cql = created_pages_query(window);
        let limit = SEARCH_LIMIT.to_string();

        let request = self
            .client
            .get(self.search_url())
            .query(&[
                ("cql", cql.as_str()),
                ("expand", SEARCH_EXPAND),
                ("limit", limit.as_str()),
            ])
            .header(AUTHORIZATION, self.credentials.basic_authorization())
            .header(CONTENT_TYPE, "application/json")
            .header("X-Atlassian-Token", "no-check");

        let response: SearchResponse = send_json(request).await?;

        if response.links.next.is_some() {
            warn!(
                limit = SEARCH_LIMIT,
                "More documents matched than a single search returns. Only the first page is counted."
            );
        }

        let documents: Vec<DocumentItem> = response
            .results
            .into_iter()
            .map(|r| DocumentItem::new(r.title, r.metadata.likes.count))
            .collect();

        info!(count = documents.len(), "Found documents");

        Ok(documents)
    }
}
