use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use crate::errors::Error;

/// User agent sent with every request. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("perf-review/", env!("CARGO_PKG_VERSION"));

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| Error::TransportError(format!("Failed to create the HTTP client: {}", e)))
}

/// Sends a request and reads the JSON body of a successful response.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, Error> {
    let response = request.send().await.map_err(|e| {
        error!(error_message = e.to_string(), "Request did not complete");
        Error::TransportError(e.to_string())
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        error!(
            status = status.as_u16(),
            error_message = e.to_string(),
            "Failed to read the response body"
        );
        Error::TransportError(e.to_string())
    })?;

    if !status.is_success() {
        error!(status = status.as_u16(), "Request was rejected");
        return Err(Error::from_status(status, &body));
    }

    debug!(status = status.as_u16(), length = body.len(), "Received response");
    serde_json::from_str(&body).map_err(|e| {
        error!(
            error_message = e.to_string(),
            "Response did not have the expected shape"
        );
        Error::MalformedResponse(e.to_string())
    })
}
