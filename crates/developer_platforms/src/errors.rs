#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents the failures that can occur when pulling activity
/// from a developer platform like GitHub or Confluence. None of these errors
/// are retried by the providers; they are handed to the caller as-is.
///
/// # Examples
///
/// ```rust
/// use perf_review_developer_platforms::errors::Error;
///
/// let auth_error = Error::AuthError("Bad credentials".to_string());
/// assert_eq!(auth_error.to_string(), "Authentication failed: Bad credentials");
///
/// let malformed = Error::MalformedResponse("missing field `edges`".to_string());
/// println!("{}", malformed);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed with the platform.
    ///
    /// The platform rejected the supplied credentials (HTTP 401 or 403). The
    /// string parameter contains the status and any message the platform
    /// returned.
    ///
    /// # Examples
    ///
    /// - Invalid personal access token
    /// - Expired Confluence API token
    /// - Token without access to the requested organization
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// The response could not be read into the expected shape.
    ///
    /// This could happen due to:
    /// - API version changes
    /// - Malformed JSON responses
    /// - Missing required fields in the response
    /// - GraphQL errors returned instead of data
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request did not complete at the network or HTTP layer.
    ///
    /// Covers connection failures, timeouts and any non-success HTTP status
    /// that is not an authentication failure.
    #[error("Transport failure: {0}")]
    TransportError(String),
}

impl Error {
    /// Classifies a non-success HTTP status returned by a platform.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, body.trim())
        };

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Error::AuthError(detail)
            }
            _ => Error::TransportError(detail),
        }
    }
}

