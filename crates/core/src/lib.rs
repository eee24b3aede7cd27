//! # Perf Review Core
//!
//! Turns a user's activity on developer platforms into a short performance
//! summary for one reporting period.
//!
//! Two pipelines feed the summary:
//! - Pull request reviews, fetched page by page and folded into a
//!   [`contributions::Tally`]
//! - Wiki pages, fetched in one search and reduced to a
//!   [`documents::DocumentSummary`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use perf_review_core::{config::ReportRequest, ReportDriver};
//! use perf_review_developer_platforms::{
//!     models::{DateWindow, Identity},
//!     DocumentSearcher, ReviewContributionFetcher,
//! };
//!
//! async fn report<F, S>(fetcher: &F, searcher: &S) -> Result<(), perf_review_core::errors::ReviewError>
//! where
//!     F: ReviewContributionFetcher,
//!     S: DocumentSearcher,
//! {
//!     let request = ReportRequest::new(
//!         DateWindow::new("2024-01-01T00:00:00Z", "2024-12-31T23:59:59Z"),
//!         Identity {
//!             user: "octocat".to_string(),
//!             organization: "github".to_string(),
//!             organization_id: "O_kgDOAAAAAQ".to_string(),
//!         },
//!     );
//!
//!     let summary = ReportDriver::new(request).run(fetcher, searcher).await?;
//!     println!("{:?}", summary);
//!     Ok(())
//! }
//! ```

use perf_review_developer_platforms::models::{DateWindow, Identity};
use perf_review_developer_platforms::{DocumentSearcher, ReviewContributionFetcher};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub mod config;
use config::ReportRequest;

pub mod contributions;
use contributions::{ContributionAggregator, Tally};

pub mod documents;
use documents::{aggregate_documents, DocumentSummary};

pub mod errors;
use errors::ReviewError;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The outcome of a report run, handed to a formatter.
///
/// A pipeline that was not part of the run leaves its field empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub identity: Identity,
    pub window: DateWindow,
    pub contributions: Option<Tally>,
    pub documents: Option<DocumentSummary>,
}

/// Runs the pipelines of a report for one [`ReportRequest`].
///
/// Every pipeline runs to completion before its result is used; any error
/// aborts the whole run.
#[derive(Debug)]
pub struct ReportDriver {
    request: ReportRequest,
}

impl ReportDriver {
    pub fn new(request: ReportRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &ReportRequest {
        &self.request
    }

    /// Counts the review contributions of the requested user.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::MissingConfiguration` if the window or identity is
    /// incomplete, otherwise any error raised while fetching a page.
    #[instrument(skip(self, fetcher), fields(user = %self.request.identity.user))]
    pub async fn contributions<F: ReviewContributionFetcher + ?Sized>(
        &self,
        fetcher: &F,
    ) -> Result<Tally, ReviewError> {
        self.request.validate_window()?;
        self.request.validate_identity()?;

        info!(
            from = %self.request.window.from,
            to = %self.request.window.to,
            organization = %self.request.identity.organization,
            "Collecting review contributions"
        );

        let aggregator = match self.request.max_pages {
            Some(max_pages) => ContributionAggregator::with_page_limit(max_pages),
            None => ContributionAggregator::new(),
        };

        aggregator
            .run(fetcher, &self.request.window, &self.request.identity)
            .await
    }

    /// Summarizes the documents created in the requested window.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::MissingConfiguration` if the window is incomplete,
    /// otherwise any error raised by the search.
    #[instrument(skip(self, searcher))]
    pub async fn documents<S: DocumentSearcher + ?Sized>(
        &self,
        searcher: &S,
    ) -> Result<DocumentSummary, ReviewError> {
        self.request.validate_window()?;

        info!(
            from = %self.request.window.from,
            to = %self.request.window.to,
            "Collecting documents"
        );

        let documents = searcher.search_documents(&self.request.window).await?;
        let summary = aggregate_documents(&documents);

        info!(
            count = summary.total_count,
            likes = summary.total_likes,
            "Summarized documents"
        );

        Ok(summary)
    }

    /// Runs both pipelines, one after the other, and builds the summary.
    pub async fn run<F, S>(&self, fetcher: &F, searcher: &S) -> Result<Summary, ReviewError>
    where
        F: ReviewContributionFetcher + ?Sized,
        S: DocumentSearcher + ?Sized,
    {
        let contributions = self.contributions(fetcher).await?;
        let documents = self.documents(searcher).await?;

        Ok(self.summary(Some(contributions), Some(documents)))
    }

    /// Wraps pipeline results into a [`Summary`] for this request.
    pub fn summary(
        &self,
        contributions: Option<Tally>,
        documents: Option<DocumentSummary>,
    ) -> Summary {
        Summary {
            identity: self.request.identity.clone(),
            window: self.request.window.clone(),
            contributions,
            documents,
        }
    }
}
