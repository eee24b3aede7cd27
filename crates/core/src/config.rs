//! Parameters for a single report run.
//!
//! Everything a run needs is passed in through [`ReportRequest`]; the core never
//! reads the environment or configuration files itself.

use perf_review_developer_platforms::models::{DateWindow, Identity};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::errors::ReviewError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// The period, the person and the limits for one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub window: DateWindow,

    pub identity: Identity,

    /// Upper bound on the number of pages fetched for the review contributions.
    ///
    /// `None` fetches until the platform reports the last page. A limit of zero
    /// cannot be expressed; every run makes at least one fetch.
    #[serde(default)]
    pub max_pages: Option<NonZeroUsize>,
}

impl ReportRequest {
    pub fn new(window: DateWindow, identity: Identity) -> Self {
        Self {
            window,
            identity,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: NonZeroUsize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Checks that both ends of the window are present.
    ///
    /// The format is not checked. A malformed date is rejected by the platform.
    pub fn validate_window(&self) -> Result<(), ReviewError> {
        require("window.from", &self.window.from)?;
        require("window.to", &self.window.to)
    }

    /// Checks that the user and the organization are present.
    pub fn validate_identity(&self) -> Result<(), ReviewError> {
        require("identity.user", &self.identity.user)?;
        require("identity.organization", &self.identity.organization)?;
        require("identity.organization_id", &self.identity.organization_id)
    }
}

fn require(name: &str, value: &str) -> Result<(), ReviewError> {
    if value.trim().is_empty() {
        return Err(ReviewError::MissingConfiguration(name.to_string()));
    }

    Ok(())
}
