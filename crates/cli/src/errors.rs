use perf_review_core::errors::ReviewError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A platform answered with something that could not be read
    #[error("Unexpected response: {0}")]
    MalformedResponse(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(format!("{:#}", err))
    }
}

impl From<ReviewError> for CliError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Auth(detail) => CliError::AuthError(detail),
            ReviewError::MalformedResponse(detail) => CliError::MalformedResponse(detail),
            ReviewError::MissingConfiguration(name) => {
                CliError::ConfigError(format!("Missing value for {}", name))
            }
            ReviewError::Transport(detail) => CliError::NetworkError(detail),
            e @ ReviewError::PageLimitExceeded(_) => CliError::Other(e.to_string()),
        }
    }
}

impl std::process::Termination for CliError {
    fn report(self) -> std::process::ExitCode {
        match self {
            CliError::ConfigError(_) => std::process::ExitCode::from(2),
            CliError::AuthError(_) => std::process::ExitCode::from(3),
            CliError::NetworkError(_) => std::process::ExitCode::from(4),
            CliError::InvalidArguments(_) => std::process::ExitCode::from(5),
            CliError::MalformedResponse(_) => std::process::ExitCode::from(6),
            CliError::Other(_) => std::process::ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
