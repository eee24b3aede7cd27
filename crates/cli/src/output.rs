use anyhow::Context;
use clap::ValueEnum;
use perf_review_core::{contributions::Tally, documents::DocumentSummary, Summary};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

const RULE: &str = "~~~~~~~~~~";

/// How the summary is written to stdout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A short human readable report
    #[default]
    Text,

    /// The summary as pretty printed JSON
    Json,
}

/// Renders the summary in the requested format.
pub fn render(summary: &Summary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(summary)),
        OutputFormat::Json => render_json(summary),
    }
}

pub fn render_json(summary: &Summary) -> anyhow::Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize the summary")
}

pub fn render_text(summary: &Summary) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("Hello {}", summary.identity.user),
        format!("From {} to {}", summary.window.from, summary.window.to),
    ];

    if let Some(tally) = &summary.contributions {
        lines.extend(contribution_lines(tally, &summary.identity.organization));
    }

    if let Some(documents) = &summary.documents {
        lines.extend(document_lines(documents));
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

fn contribution_lines(tally: &Tally, organization: &str) -> Vec<String> {
    vec![
        format!(
            "You've made {} PR reviews in {} with {} comments",
            tally.total_reviews, organization, tally.total_comments
        ),
        format!(
            "There are {} comments in good quality, {} are short-form and {} are long-form",
            tally.suggestion_count, tally.long_count, tally.very_long_count
        ),
        "Keep it up, review code better 💪💪💪".to_string(),
    ]
}

fn document_lines(documents: &DocumentSummary) -> Vec<String> {
    let most_liked = match &documents.significant.best_title {
        Some(title) => format!(
            "> The most liked page is {} with {} likes",
            title, documents.significant.best_like_count
        ),
        None => "> None of your pages received a like yet".to_string(),
    };

    vec![
        format!(
            "You've made {} confluence pages with total {} likes",
            documents.total_count, documents.total_likes
        ),
        most_liked,
        "Keep it up, write more proposals or knowledge pages 📝✍️".to_string(),
    ]
}
