//! Fetches the quality-gate verdict for a finished analysis.

use crate::deadline::Deadline;
use crate::error::Result;
use crate::ports::http::{Credentials, HttpClient, HttpRequest};
use crate::remote::get_json;

use super::model::{ProjectStatusEnvelope, QualityGateVerdict};

/// Host of the hosted (SaaS) analysis service.
pub const SAAS_HOST: &str = "sonarcloud.io";

/// Builds the quality-gate URL for `analysis_id` on `host`.
#[must_use]
pub fn project_status_url(host: &str, analysis_id: &str) -> String {
    format!("https://{host}/api/qualitygates/project_status?analysisId={analysis_id}")
}

/// Reads quality-gate verdicts from one resolved host.
pub struct AnalysisFetcher<'a> {
    http: &'a dyn HttpClient,
    host: &'a str,
    deadline: Deadline,
}

impl<'a> AnalysisFetcher<'a> {
    /// Creates a fetcher bound to `host`.
    #[must_use]
    pub fn new(http: &'a dyn HttpClient, host: &'a str, deadline: Deadline) -> Self {
        Self { http, host, deadline }
    }

    /// Fetches the verdict for `analysis_id`. A single attempt; never retried.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EvidenceError::Transport`] on non-2xx status,
    /// network failure, or an undecodable body.
    pub async fn fetch(
        &self,
        analysis_id: &str,
        credentials: &Credentials,
    ) -> Result<QualityGateVerdict> {
        let url = project_status_url(self.host, analysis_id);
        let request = HttpRequest::get(url, credentials.clone());
        let envelope: ProjectStatusEnvelope = get_json(self.http, &self.deadline, &request).await?;
        let verdict = envelope.project_status;
        tracing::info!(
            analysis_id,
            gate = %verdict.status,
            conditions = verdict.conditions.len(),
            "quality gate verdict"
        );
        Ok(verdict)
    }
}
