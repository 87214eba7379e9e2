//! `ci-evidence jira`: issue transition evidence.

use crate::cli::JiraArgs;
use crate::config::JiraConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::jira;

/// Validates `args`, checks every issue, and returns the report as JSON.
///
/// # Errors
///
/// Returns a configuration error or the first failed issue lookup.
pub async fn run(ctx: &ServiceContext, args: &JiraArgs) -> Result<String> {
    let config = JiraConfig::from_args(args)?;
    let report = jira::run(ctx, &config).await?;
    Ok(report.to_json()?)
}
