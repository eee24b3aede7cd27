use std::{
    collections::HashMap,
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};

use perf_review_core::config::ReportRequest;
use perf_review_developer_platforms::{
    github::GITHUB_GRAPHQL_ENDPOINT,
    models::{DateWindow, Identity},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::CliError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".perf-review.toml";

/// Name of the dotenv file read from the working directory
pub const DOTENV_FILENAME: &str = ".env";

/// Environment variable holding the GitHub personal access token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_ACCESS_TOKEN";

/// Environment variable holding the Confluence API token
pub const ENV_CONFLUENCE_TOKEN: &str = "CONFLUENCE_API_TOKEN";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Configuration for the perf-review CLI
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where and for whom review contributions are collected
    #[serde(default)]
    pub github: GitHubConfig,

    /// The Confluence site documents are searched on
    #[serde(default)]
    pub confluence: ConfluenceConfig,

    /// The reporting period
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl AppConfig {
    /// Load configuration from the specified file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(CliError::ConfigError(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("Failed to read configuration file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!("Failed to parse configuration file: {}", e))
        })?;

        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Load the configuration file if it exists, otherwise start from the defaults.
    ///
    /// A file that was asked for explicitly must exist.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self, CliError> {
        if explicit || path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Overrides settings with the values found by `lookup`.
    ///
    /// The variable names are those of the environment, e.g. `SESSION_START`.
    pub fn apply_environment<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut Option<String>); 7] = [
            ("GITHUB_USERNAME", &mut self.github.user),
            ("GITHUB_OWNER", &mut self.github.organization),
            ("GITHUB_OWNER_ID", &mut self.github.organization_id),
            ("SESSION_START", &mut self.window.from),
            ("SESSION_END", &mut self.window.to),
            ("CONFLUENCE_DOMAIN", &mut self.confluence.domain),
            ("CONFLUENCE_USER", &mut self.confluence.user),
        ];

        for (name, target) in overrides {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                debug!(variable = name, "Using value from the environment");
                *target = Some(value);
            }
        }
    }

    /// Overrides the reporting period with values given on the command line.
    pub fn apply_window(&mut self, from: Option<String>, to: Option<String>) {
        if from.is_some() {
            self.window.from = from;
        }

        if to.is_some() {
            self.window.to = to;
        }
    }

    /// Builds the request for the core. Missing values are left empty and
    /// reported by the pipeline that needs them.
    pub fn report_request(&self) -> ReportRequest {
        ReportRequest {
            window: DateWindow::new(
                self.window.from.clone().unwrap_or_default(),
                self.window.to.clone().unwrap_or_default(),
            ),
            identity: Identity {
                user: self.github.user.clone().unwrap_or_default(),
                organization: self.github.organization.clone().unwrap_or_default(),
                organization_id: self.github.organization_id.clone().unwrap_or_default(),
            },
            max_pages: self.report.max_pages,
        }
    }

    /// Rejects a reporting period that ends before it starts.
    ///
    /// Only the date parts are compared, and only when both look like
    /// `YYYY-MM-DD`. Anything else is left for the platform to reject.
    pub fn validate_window_order(&self) -> Result<(), CliError> {
        let (Some(from), Some(to)) = (self.window.from.as_deref(), self.window.to.as_deref())
        else {
            return Ok(());
        };

        match (calendar_date(from), calendar_date(to)) {
            (Some(from_date), Some(to_date)) if from_date > to_date => {
                Err(CliError::InvalidArguments(format!(
                    "The reporting period starts at {} but ends earlier, at {}",
                    from, to
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }
}

/// GitHub settings
#[derive(Debug, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// The GraphQL endpoint
    #[serde(default = "default_github_endpoint")]
    pub endpoint: String,

    /// Login of the reviewer
    pub user: Option<String>,

    /// Display name of the organization
    pub organization: Option<String>,

    /// Node ID of the organization
    pub organization_id: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            endpoint: default_github_endpoint(),
            user: None,
            organization: None,
            organization_id: None,
        }
    }
}

/// Confluence settings
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfluenceConfig {
    /// The Atlassian domain, e.g. `example.atlassian.net`
    pub domain: Option<String>,

    /// Full site URL, used instead of `domain` for sites not served over `https://{domain}`
    pub base_url: Option<String>,

    /// The account email used to authenticate
    pub user: Option<String>,
}

/// The reporting period
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WindowConfig {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Stop fetching review contributions after this many pages
    pub max_pages: Option<NonZeroUsize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for each request to a platform
    pub timeout_seconds: Option<u64>,
}

/// Secrets are only ever read from the environment.
#[derive(Default)]
pub struct Secrets {
    pub github_token: Option<String>,
    pub confluence_token: Option<String>,
}

impl Secrets {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            github_token: lookup(ENV_GITHUB_TOKEN).filter(|v| !v.is_empty()),
            confluence_token: lookup(ENV_CONFLUENCE_TOKEN).filter(|v| !v.is_empty()),
        }
    }
}

/// Values from a dotenv file, consulted after the process environment.
#[derive(Debug, Default)]
pub struct DotEnv {
    values: HashMap<String, String>,
}

impl DotEnv {
    /// Reads `path` if it exists. A missing file yields no values.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            debug!("No dotenv file at {:?}", path);
            return Ok(Self::default());
        }

        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            CliError::ConfigError(format!("Failed to read {:?}: {}", path, e))
        })?;

        let mut values = HashMap::new();
        for entry in entries {
            let (name, value) = entry.map_err(|e| {
                CliError::ConfigError(format!("Failed to parse {:?}: {}", path, e))
            })?;
            values.insert(name, value);
        }

        info!(count = values.len(), "Loaded variables from {:?}", path);
        Ok(Self { values })
    }

    /// Looks a name up in `process` first and falls back to the dotenv values.
    pub fn layered<'a, F>(&'a self, process: F) -> impl Fn(&str) -> Option<String> + 'a
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        move |name: &str| {
            process(name)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| self.values.get(name).cloned())
        }
    }
}

/// Get the path to the dotenv file in the working directory
pub fn get_dotenv_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DOTENV_FILENAME)
}

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// The `YYYY-MM-DD` part of a date or timestamp, if it has that shape.
fn calendar_date(value: &str) -> Option<&str> {
    let date = value.trim().split('T').next()?;
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    shaped.then_some(date)
}

fn default_github_endpoint() -> String {
    GITHUB_GRAPHQL_ENDPOINT.to_string()
}
