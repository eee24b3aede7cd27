use clap::Args;
use perf_review_core::{errors::ReviewError, ReportDriver, Summary};
use perf_review_developer_platforms::{
    auth::Credentials, confluence::ConfluenceProvider, github::GitHubProvider,
};
use tracing::{debug, info, instrument};

use crate::config::{
    get_config_path, get_dotenv_path, AppConfig, DotEnv, Secrets, ENV_CONFLUENCE_TOKEN,
    ENV_GITHUB_TOKEN,
};
use crate::errors::CliError;
use crate::output::{render, OutputFormat};

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Arguments shared by the report commands
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Start of the reporting period, overrides SESSION_START
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// End of the reporting period, overrides SESSION_END
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,
}

/// The pipelines a command runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pipelines {
    Contributions,
    Documents,
    All,
}

/// Runs the requested pipelines and prints the summary to stdout.
///
/// Settings come from the configuration file, then the `.env` file, then the
/// process environment, then the command line, each overriding the one before.
#[instrument(skip(args))]
pub async fn execute(
    args: ReportArgs,
    pipelines: Pipelines,
    format: OutputFormat,
) -> Result<(), CliError> {
    let dotenv = DotEnv::load(&get_dotenv_path())?;
    let lookup = dotenv.layered(|name: &str| std::env::var(name).ok());

    let config = load_config(&args, &lookup)?;
    let secrets = Secrets::from_lookup(&lookup);

    let summary = build_summary(&config, &secrets, pipelines).await?;

    println!("{}", render(&summary, format)?);
    Ok(())
}

/// Loads the configuration and layers the environment and the arguments on top of it.
pub fn load_config<F>(args: &ReportArgs, lookup: F) -> Result<AppConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = get_config_path(args.config.as_deref());
    let mut config = AppConfig::load_or_default(&path, args.config.is_some())?;

    config.apply_environment(lookup);
    config.apply_window(args.from.clone(), args.to.clone());
    config.validate_window_order()?;

    debug!(
        from = ?config.window.from,
        to = ?config.window.to,
        "Resolved reporting period"
    );
    Ok(config)
}

/// Runs the pipelines against the platforms described by `config`.
pub async fn build_summary(
    config: &AppConfig,
    secrets: &Secrets,
    pipelines: Pipelines,
) -> Result<Summary, CliError> {
    let driver = ReportDriver::new(config.report_request());

    let summary = match pipelines {
        Pipelines::Contributions => {
            let github = github_provider(config, secrets)?;
            let tally = driver.contributions(&github).await?;
            driver.summary(Some(tally), None)
        }
        Pipelines::Documents => {
            let confluence = confluence_provider(config, secrets)?;
            let documents = driver.documents(&confluence).await?;
            driver.summary(None, Some(documents))
        }
        Pipelines::All => {
            let github = github_provider(config, secrets)?;
            let confluence = confluence_provider(config, secrets)?;
            driver.run(&github, &confluence).await?
        }
    };

    info!("Report complete");
    Ok(summary)
}

fn github_provider(config: &AppConfig, secrets: &Secrets) -> Result<GitHubProvider, CliError> {
    let user = required(config.github.user.as_deref(), "GITHUB_USERNAME")?;
    let token = required(secrets.github_token.as_deref(), ENV_GITHUB_TOKEN)?;

    let provider = GitHubProvider::new(
        config.github.endpoint.clone(),
        Credentials::new(user, token),
        config.timeout(),
    )
    .map_err(ReviewError::from)?;
    Ok(provider)
}

fn confluence_provider(
    config: &AppConfig,
    secrets: &Secrets,
) -> Result<ConfluenceProvider, CliError> {
    let user = required(config.confluence.user.as_deref(), "CONFLUENCE_USER")?;
    let token = required(secrets.confluence_token.as_deref(), ENV_CONFLUENCE_TOKEN)?;
    let credentials = Credentials::new(user, token);

    let provider = match config.confluence.base_url.as_deref() {
        Some(base_url) => ConfluenceProvider::new(base_url, credentials, config.timeout()),
        None => {
            let domain = required(config.confluence.domain.as_deref(), "CONFLUENCE_DOMAIN")?;
            ConfluenceProvider::for_domain(domain, credentials, config.timeout())
        }
    }
    .map_err(ReviewError::from)?;
    Ok(provider)
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, CliError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::ConfigError(format!("Missing value for {}", name)))
}
