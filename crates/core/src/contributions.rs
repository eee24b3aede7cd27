//! # Review contributions
//!
//! Counts the pull request reviews a user wrote and grades the comments they
//! left while doing so.
//!
//! Reviews arrive one page at a time. [`ContributionAggregator`] walks the
//! pages by following the cursor each page hands back, folding every review
//! into a [`Tally`]. The walk is an explicit two state machine
//! ([`FetchState::Fetching`] and [`FetchState::Done`]) so that each page is
//! requested once and each review is counted once.

use perf_review_developer_platforms::models::{
    CommentItem, DateWindow, Identity, Page, ReviewItem,
};
use perf_review_developer_platforms::ReviewContributionFetcher;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::{debug, info, instrument, warn};

use crate::errors::ReviewError;

#[cfg(test)]
#[path = "contributions_tests.rs"]
mod tests;

/// Running totals for the review contributions of a user.
///
/// # Examples
///
/// ```
/// use perf_review_core::contributions::Tally;
/// use perf_review_developer_platforms::models::{CommentItem, ReviewItem};
///
/// let mut tally = Tally::default();
/// tally.record_review(&ReviewItem::new("Looks good", vec![CommentItem::new("nit")]));
///
/// assert_eq!(tally.total_reviews, 1);
/// assert_eq!(tally.total_comments, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Number of reviews, with or without comments
    pub total_reviews: u64,

    /// Number of non-empty review bodies plus number of inline comments
    pub total_comments: u64,

    /// Inline comments that link to a reference or suggest a change
    pub suggestion_count: u64,

    /// Inline comments longer than 200 characters
    pub long_count: u64,

    /// Inline comments longer than 500 characters
    pub very_long_count: u64,
}

impl Tally {
    /// Adds a single review, its body and all of its inline comments.
    pub fn record_review(&mut self, review: &ReviewItem) {
        self.total_reviews += 1;

        if !review.review_body.is_empty() {
            self.total_comments += 1;
        }

        for comment in &review.comments {
            self.record_comment(comment);
        }
    }

    fn record_comment(&mut self, comment: &CommentItem) {
        self.total_comments += 1;

        if comment.has_suggestion_or_link() {
            self.suggestion_count += 1;
        }

        if comment.is_long() {
            self.long_count += 1;
        }

        if comment.is_very_long() {
            self.very_long_count += 1;
        }
    }
}

/// Where the aggregator is in the walk over the pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// The page after `cursor` still has to be fetched. `None` is the first page.
    Fetching { cursor: Option<String> },

    /// The last page has been processed.
    Done,
}

/// Walks the pages of review contributions and folds them into a [`Tally`].
///
/// The walk ends when a page comes back without a next cursor. The aggregator
/// relies on the platform to advance its cursor; a platform that keeps handing
/// back the same cursor keeps the walk going unless a page limit is set with
/// [`ContributionAggregator::with_page_limit`].
///
/// # Examples
///
/// ```rust,no_run
/// use perf_review_core::contributions::ContributionAggregator;
/// use perf_review_developer_platforms::{
///     models::{DateWindow, Identity},
///     ReviewContributionFetcher,
/// };
///
/// async fn count<F: ReviewContributionFetcher>(
///     fetcher: &F,
///     window: &DateWindow,
///     identity: &Identity,
/// ) -> Result<(), perf_review_core::errors::ReviewError> {
///     let tally = ContributionAggregator::new()
///         .run(fetcher, window, identity)
///         .await?;
///
///     println!("{} reviews, {} comments", tally.total_reviews, tally.total_comments);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ContributionAggregator {
    max_pages: Option<NonZeroUsize>,
    pages_fetched: usize,
    state: FetchState,
    tally: Tally,
}

impl ContributionAggregator {
    pub fn new() -> Self {
        Self {
            max_pages: None,
            pages_fetched: 0,
            state: FetchState::Fetching { cursor: None },
            tally: Tally::default(),
        }
    }

    /// Creates an aggregator that gives up after fetching `max_pages` pages.
    pub fn with_page_limit(max_pages: NonZeroUsize) -> Self {
        Self {
            max_pages: Some(max_pages),
            ..Self::new()
        }
    }

    /// Folds a fetched page into the tally and moves to the next state.
    ///
    /// Pages handed in after the last page has been seen are ignored.
    pub fn absorb(&mut self, page: Page<ReviewItem>) {
        if self.state == FetchState::Done {
            warn!(
                count = page.items.len(),
                "Ignoring a page received after the last page"
            );
            return;
        }

        for review in &page.items {
            self.tally.record_review(review);
        }
        self.pages_fetched += 1;

        self.state = match page.next_cursor {
            Some(cursor) => FetchState::Fetching {
                cursor: Some(cursor),
            },
            None => FetchState::Done,
        };
    }

    pub fn is_done(&self) -> bool {
        self.state == FetchState::Done
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The final tally, available once the last page has been absorbed.
    pub fn tally(&self) -> Option<Tally> {
        match self.state {
            FetchState::Done => Some(self.tally),
            FetchState::Fetching { .. } => None,
        }
    }

    /// Fetches pages from `fetcher` until the last one and returns the tally.
    ///
    /// # Errors
    ///
    /// Any error from the fetcher ends the walk and is returned; the counts
    /// gathered so far are discarded. Returns `ReviewError::PageLimitExceeded`
    /// when a page limit is set and the last page was not reached within it.
    #[instrument(skip(self, fetcher, window, identity), fields(user = %identity.user))]
    pub async fn run<F: ReviewContributionFetcher + ?Sized>(
        mut self,
        fetcher: &F,
        window: &DateWindow,
        identity: &Identity,
    ) -> Result<Tally, ReviewError> {
        while let FetchState::Fetching { cursor } = &self.state {
            if let Some(max_pages) = self.max_pages.map(NonZeroUsize::get) {
                if self.pages_fetched >= max_pages {
                    warn!(
                        max_pages,
                        "Reached the page limit before the last page of review contributions"
                    );
                    return Err(ReviewError::PageLimitExceeded(max_pages));
                }
            }

            let page = fetcher
                .fetch_review_contributions(cursor.as_deref(), window, identity)
                .await?;

            debug!(
                page = self.pages_fetched + 1,
                count = page.items.len(),
                last = page.is_last(),
                "Absorbing page of review contributions"
            );
            self.absorb(page);
        }

        info!(
            pages = self.pages_fetched,
            reviews = self.tally.total_reviews,
            comments = self.tally.total_comments,
            "Finished counting review contributions"
        );

        Ok(self.tally)
    }
}

impl Default for ContributionAggregator {
    fn default() -> Self {
        Self::new()
    }
}
