//! Command-line arguments.

use clap::Parser;

/// Harvest the slowest test executions from CI build reports.
#[derive(Parser, Debug)]
#[command(
    name = "laggard",
    version,
    about = "Rank the slowest test executions across CI build reports"
)]
pub struct Cli {
    /// Build URLs to aggregate, one CI job invocation each.
    #[arg(required = true, value_name = "BUILD_URL")]
    pub build_urls: Vec<String>,

    /// Job name override; requires a single build URL.
    #[arg(long)]
    pub job: Option<String>,

    /// How many results to keep.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the ranking as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Derive a job name from a CI build URL (`.../job/<name>/...`).
///
/// Falls back to the whole URL when no job segment is present.
pub fn job_name_from_url(url: &str) -> String {
    let Some(idx) = url.find("/job/") else {
        return url.to_string();
    };
    let tail = &url[idx + "/job/".len()..];
    let name = tail.split('/').next().unwrap_or("");
    if name.is_empty() {
        url.to_string()
    } else {
        name.to_string()
    }
}
