use perf_review_developer_platforms::errors::Error as PlatformError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort a report run.
///
/// A run either produces a complete summary or fails with one of these. There
/// is no partially complete report.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing configuration value: {0}")]
    MissingConfiguration(String),

    #[error("Stopped after fetching {0} pages without reaching the last page")]
    PageLimitExceeded(usize),

    #[error("Transport failure: {0}")]
    Transport(String),
}

impl From<PlatformError> for ReviewError {
    fn from(e: PlatformError) -> Self {
        match e {
            PlatformError::AuthError(detail) => ReviewError::Auth(detail),
            PlatformError::MalformedResponse(detail) => ReviewError::MalformedResponse(detail),
            PlatformError::TransportError(detail) => ReviewError::Transport(detail),
        }
    }
}
