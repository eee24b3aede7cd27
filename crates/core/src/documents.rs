//! # Documents
//!
//! Summarizes the wiki pages a user created: how many, how many likes they
//! collected in total, and which page was liked the most.

use perf_review_developer_platforms::models::DocumentItem;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;

/// The most liked document seen so far.
///
/// Only a strictly higher like count replaces the current document, so the
/// first of several equally liked documents is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignificantDocument {
    pub best_like_count: u64,
    pub best_title: Option<String>,
}

impl SignificantDocument {
    fn consider(&mut self, document: &DocumentItem) {
        if document.like_count > self.best_like_count {
            self.best_like_count = document.like_count;
            self.best_title = Some(document.title.clone());
        }
    }
}

/// Totals for the documents created in the reporting period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub total_count: u64,
    pub total_likes: u64,
    pub significant: SignificantDocument,
}

/// Summarizes a complete list of documents in a single pass.
///
/// # Examples
///
/// ```
/// use perf_review_core::documents::aggregate_documents;
/// use perf_review_developer_platforms::models::DocumentItem;
///
/// let summary = aggregate_documents(&[
///     DocumentItem::new("A", 5),
///     DocumentItem::new("B", 5),
///     DocumentItem::new("C", 7),
/// ]);
///
/// assert_eq!(summary.total_count, 3);
/// assert_eq!(summary.total_likes, 17);
/// assert_eq!(summary.significant.best_title.as_deref(), Some("C"));
/// ```
pub fn aggregate_documents(documents: &[DocumentItem]) -> DocumentSummary {
    let mut summary = DocumentSummary {
        total_count: documents.len() as u64,
        ..DocumentSummary::default()
    };

    for document in documents {
        summary.total_likes += document.like_count;
        summary.significant.consider(document);
    }

    summary
}
