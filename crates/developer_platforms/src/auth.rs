use base64::Engine;
use std::fmt;

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

/// A user name and secret token pair used for HTTP basic authentication.
///
/// Both GitHub and Confluence accept a personal token as the basic auth
/// password. The token is never printed by the `Debug` implementation.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The value for an `Authorization` header.
    ///
    /// ```
    /// use perf_review_developer_platforms::auth::Credentials;
    ///
    /// let credentials = Credentials::new("user", "token");
    /// assert_eq!(credentials.basic_authorization(), "Basic dXNlcjp0b2tlbg==");
    /// ```
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.username, self.token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
