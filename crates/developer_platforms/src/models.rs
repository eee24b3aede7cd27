//! # Models
//!
//! This module contains the data models shared between the platform clients
//! and the aggregation core.
//!
//! The models are deliberately flat: each provider translates the nested
//! response of its platform into these types so that the aggregation code never
//! sees a wire format.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A single comment left as part of a pull request review.
///
/// # Examples
///
/// ```
/// use perf_review_developer_platforms::models::CommentItem;
///
/// let comment = CommentItem::new("```suggestion\nlet x = 1;\n```");
/// assert!(comment.has_suggestion_or_link());
/// assert!(!comment.is_long());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentItem {
    /// The markdown body of the comment
    pub body: String,
}

impl CommentItem {
    /// Comments with more characters than this are considered long.
    pub const LONG_THRESHOLD: usize = 200;

    /// Comments with more characters than this are considered very long.
    pub const VERY_LONG_THRESHOLD: usize = 500;

    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns `true` when the comment links to an external reference or
    /// carries a suggested change block.
    pub fn has_suggestion_or_link(&self) -> bool {
        self.body.contains("https://")
            || self.body.contains("http://")
            || self.body.contains("```suggestion")
    }

    /// Returns `true` when the comment has more than [`Self::LONG_THRESHOLD`] characters.
    pub fn is_long(&self) -> bool {
        self.char_length() > Self::LONG_THRESHOLD
    }

    /// Returns `true` when the comment has more than [`Self::VERY_LONG_THRESHOLD`] characters.
    pub fn is_very_long(&self) -> bool {
        self.char_length() > Self::VERY_LONG_THRESHOLD
    }

    fn char_length(&self) -> usize {
        self.body.chars().count()
    }
}

/// A page returned by the wiki search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    /// The title of the page
    pub title: String,

    /// The number of likes the page received
    pub like_count: u64,
}

impl DocumentItem {
    pub fn new(title: impl Into<String>, like_count: u64) -> Self {
        Self {
            title: title.into(),
            like_count,
        }
    }
}

/// The reporting period.
///
/// Both ends are ISO-8601 timestamps as accepted by the platforms. Only their
/// presence is checked; a malformed timestamp is rejected by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Start of the period, e.g. `2024-01-01T00:00:00Z`
    pub from: String,

    /// End of the period, e.g. `2024-12-31T23:59:59Z`
    pub to: String,
}

impl DateWindow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The date part of the start of the window.
    ///
    /// ```
    /// use perf_review_developer_platforms::models::DateWindow;
    ///
    /// let window = DateWindow::new("2024-01-01T00:00:01", "2024-06-30");
    /// assert_eq!(window.from_date(), "2024-01-01");
    /// assert_eq!(window.to_date(), "2024-06-30");
    /// ```
    pub fn from_date(&self) -> &str {
        date_part(&self.from)
    }

    /// The date part of the end of the window.
    pub fn to_date(&self) -> &str {
        date_part(&self.to)
    }
}

fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// The person and organization the review contributions are collected for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The login of the user
    pub user: String,

    /// The display name of the organization
    pub organization: String,

    /// The node ID of the organization, used to scope the contributions
    pub organization_id: String,
}

/// One page of results from a cursor-paginated query.
///
/// `next_cursor` is `None` exactly when there is nothing left to fetch. When
/// present it is an opaque token that is only meaningful to the provider that
/// returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The results on this page, in the platform's order
    pub items: Vec<T>,

    /// The token to pass to the next fetch, if there is a next page
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// The final page of a result set.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// A page that is followed by another one.
    pub fn with_next(items: Vec<T>, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor.into()),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// A pull request review written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// The top level body of the review, empty when the reviewer left none
    pub review_body: String,

    /// The inline comments that were submitted with the review
    pub comments: Vec<CommentItem>,
}

impl ReviewItem {
    pub fn new(review_body: impl Into<String>, comments: Vec<CommentItem>) -> Self {
        Self {
            review_body: review_body.into(),
            comments,
        }
    }
}
