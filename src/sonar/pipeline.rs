//! Sequences descriptor, poll, fetch, and assembly into one evidence run.

use crate::config::SonarConfig;
use crate::context::ServiceContext;
use crate::deadline::Deadline;
use crate::error::Result;

use super::analysis::AnalysisFetcher;
use super::assemble::assemble;
use super::descriptor::read_descriptor;
use super::model::EvidenceDocument;
use super::poller::StatusPoller;

/// Runs the quality-gate pipeline against the ports in `ctx`.
///
/// Any failure short-circuits; a document is returned only when every step
/// succeeded.
///
/// # Errors
///
/// Returns the first failure of any step.
pub async fn run(ctx: &ServiceContext, config: &SonarConfig) -> Result<EvidenceDocument> {
    let deadline = Deadline::after(config.deadline);
    tracing::info!(
        mode = %config.mode,
        host = %config.host,
        descriptor = %config.descriptor_path.display(),
        "collecting quality-gate evidence"
    );

    let descriptor = read_descriptor(ctx.fs.as_ref(), &config.descriptor_path)?;

    let poller = StatusPoller::new(ctx.http.as_ref(), ctx.clock.as_ref(), config.retry, deadline);
    let task = poller
        .poll(&descriptor.task_status_url, &config.credentials)
        .await?
        .require_success()?;

    let fetcher = AnalysisFetcher::new(ctx.http.as_ref(), &config.host, deadline);
    let verdict = fetcher.fetch(&task.analysis_id, &config.credentials).await?;

    assemble(task, verdict, config.fail_on_analysis_failure)
}
