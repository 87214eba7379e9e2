//! `ci-evidence sonar`: quality-gate evidence.

use crate::cli::SonarArgs;
use crate::config::SonarConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::sonar;

/// Validates `args`, runs the pipeline, and returns the document as JSON.
///
/// # Errors
///
/// Returns a configuration error or the first pipeline failure.
pub async fn run(ctx: &ServiceContext, args: &SonarArgs) -> Result<String> {
    let config = SonarConfig::from_args(args)?;
    let document = sonar::run(ctx, &config).await?;
    Ok(document.to_json()?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::error::EvidenceError;

    fn args(mode: &str, host: Option<&str>) -> SonarArgs {
        SonarArgs {
            report_task_file: PathBuf::from("task.txt"),
            token: Some("t".into()),
            mode: mode.into(),
            host: host.map(Into::into),
            fail_on_analysis_failure: false,
            max_retries: 3,
            wait_time: 5,
            deadline: 30,
        }
    }

    fn empty_context() -> ServiceContext {
        ServiceContext::from_cassette(&Cassette {
            name: "empty".into(),
            recorded_at: Utc::now(),
            tool_version: "0.0.0".into(),
            interactions: Vec::new(),
        })
    }

    #[tokio::test]
    async fn config_errors_precede_any_io() {
        let err = run(&empty_context(), &args("SELFHOSTED", None)).await.unwrap_err();
        assert!(matches!(err, EvidenceError::Config(_)));
    }

    #[tokio::test]
    async fn self_hosted_run_queries_configured_host() {
        let task_url = "https://sonar.internal/api/ce/task?id=T9";
        let gate_url = "https://sonar.internal/api/qualitygates/project_status?analysisId=A9";
        let ctx = ServiceContext::from_cassette(&Cassette {
            name: "self-hosted".into(),
            recorded_at: Utc::now(),
            tool_version: "0.0.0".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "fs".into(),
                    method: "read_to_string".into(),
                    input: json!({"path": "task.txt"}),
                    output: json!({"Ok": format!("ceTaskUrl={task_url}")}),
                },
                Interaction {
                    seq: 1,
                    port: "http".into(),
                    method: "get".into(),
                    input: json!({"url": task_url}),
                    output: json!({"Ok": {"status": 200, "body": r#"{"task":{"status":"SUCCESS","analysisId":"A9"}}"#}}),
                },
                Interaction {
                    seq: 2,
                    port: "http".into(),
                    method: "get".into(),
                    input: json!({"url": gate_url}),
                    output: json!({"Ok": {"status": 200, "body": r#"{"projectStatus":{"status":"OK"}}"#}}),
                },
            ],
        });

        let json = run(&ctx, &args("selfhosted", Some("sonar.internal"))).await.unwrap();

        assert!(json.starts_with(r#"{"task":{"status":"SUCCESS","analysisId":"A9""#));
    }
}
