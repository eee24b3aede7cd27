//! # Developer platforms
//!
//! Clients for the services a performance review pulls activity from.
//!
//! The aggregation code only talks to the traits in this module. The concrete
//! providers ([`github::GitHubProvider`] and [`confluence::ConfluenceProvider`])
//! translate the wire format of each platform into the flat
//! [`models`] types.

use async_trait::async_trait;

pub mod auth;

pub mod confluence;

pub mod errors;

pub mod github;

pub mod models;

mod transport;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

use errors::Error;
use models::{DateWindow, DocumentItem, Identity, Page, ReviewItem};

/// Trait for platforms that list the pull request reviews a user wrote, one page at a time.
///
/// Implementations must return the results after `cursor` in a stable order so
/// that chaining the returned cursors visits every review exactly once.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use perf_review_developer_platforms::{
///     errors::Error,
///     models::{DateWindow, Identity, Page, ReviewItem},
///     ReviewContributionFetcher,
/// };
///
/// #[derive(Debug)]
/// struct FixedReviews {
///     reviews: Vec<ReviewItem>,
/// }
///
/// #[async_trait]
/// impl ReviewContributionFetcher for FixedReviews {
///     async fn fetch_review_contributions(
///         &self,
///         _cursor: Option<&str>,
///         _window: &DateWindow,
///         _identity: &Identity,
///     ) -> Result<Page<ReviewItem>, Error> {
///         Ok(Page::last(self.reviews.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait ReviewContributionFetcher: Send + Sync {
    /// Fetches the page of review contributions that follows `cursor`.
    ///
    /// # Arguments
    ///
    /// * `cursor` - `None` for the first page, otherwise a token previously
    ///   returned by this fetcher
    /// * `window` - The period the reviews were created in
    /// * `identity` - The reviewer and the organization to scope to
    ///
    /// # Returns
    ///
    /// A `Result` containing the page. The page's `next_cursor` is `None`
    /// when there are no more reviews.
    async fn fetch_review_contributions(
        &self,
        cursor: Option<&str>,
        window: &DateWindow,
        identity: &Identity,
    ) -> Result<Page<ReviewItem>, Error>;
}

/// Trait for platforms that can search the documents the current user created.
#[async_trait]
pub trait DocumentSearcher: Send + Sync {
    /// Searches the documents created within `window`.
    ///
    /// The search is a single bounded query; the returned list is treated as
    /// the complete result set.
    async fn search_documents(&self, window: &DateWindow) -> Result<Vec<DocumentItem>, Error>;
}
