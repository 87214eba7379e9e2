//! Validated run configuration.
//!
//! Command-line flags and environment variables are merged by clap; this
//! module turns the raw values into value objects checked once, before any
//! I/O happens.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cli::{JiraArgs, SonarArgs};
use crate::error::{EvidenceError, Result};
use crate::ports::http::Credentials;
use crate::retry::RetryPolicy;
use crate::sonar::analysis::SAAS_HOST;

/// Descriptor path written by the scanner when none is given.
pub const DEFAULT_DESCRIPTOR_PATH: &str = ".scannerwork/.report-task.txt";

/// Longest accepted run deadline, in seconds (one day).
pub const MAX_DEADLINE_SECS: u64 = 86_400;

/// Where the analysis service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    /// The hosted service at [`SAAS_HOST`].
    #[default]
    Saas,
    /// A self-hosted server at a configured host.
    SelfHosted,
}

impl FromStr for DeploymentMode {
    type Err = EvidenceError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SAAS" => Ok(Self::Saas),
            "SELFHOSTED" => Ok(Self::SelfHosted),
            other => Err(EvidenceError::Config(format!(
                "unknown deployment mode {other:?}, expected SAAS or SELFHOSTED"
            ))),
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Saas => "SAAS",
            Self::SelfHosted => "SELFHOSTED",
        })
    }
}

/// Everything the quality-gate pipeline needs.
#[derive(Debug, Clone)]
pub struct SonarConfig {
    /// Bearer token for the analysis service.
    pub credentials: Credentials,
    /// Deployment mode the host was resolved from.
    pub mode: DeploymentMode,
    /// Resolved host, without scheme.
    pub host: String,
    /// Scanner descriptor file.
    pub descriptor_path: PathBuf,
    /// Fail instead of emitting evidence when the gate is not `OK`.
    pub fail_on_analysis_failure: bool,
    /// Polling budget for the task-status endpoint.
    pub retry: RetryPolicy,
    /// Overall bound on the run's network calls.
    pub deadline: Duration,
}

impl SonarConfig {
    /// Validates the `sonar` subcommand arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::Config`] when the token is missing, the mode
    /// is unknown, or self-hosted mode has no host.
    pub fn from_args(args: &SonarArgs) -> Result<Self> {
        let token = required(args.token.as_deref(), "SONAR_TOKEN")?;
        let mode: DeploymentMode = args.mode.parse()?;
        let host = match mode {
            DeploymentMode::Saas => {
                if args.host.is_some() {
                    tracing::debug!("ignoring configured host in SAAS mode");
                }
                SAAS_HOST.to_string()
            }
            DeploymentMode::SelfHosted => {
                let host = required(args.host.as_deref(), "SONAR_HOST")?;
                normalize_host(host)
            }
        };

        Ok(Self {
            credentials: Credentials::Bearer(token.to_string()),
            mode,
            host,
            descriptor_path: args.report_task_file.clone(),
            fail_on_analysis_failure: args.fail_on_analysis_failure,
            retry: RetryPolicy::new(args.max_retries, Duration::from_secs(args.wait_time)),
            deadline: deadline(args.deadline)?,
        })
    }
}

/// Everything the issue-transition check needs.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the issue tracker, without trailing slash.
    pub base_url: String,
    /// Basic-auth credentials.
    pub credentials: Credentials,
    /// Status name to look for.
    pub transition: String,
    /// Issue keys, in the order given.
    pub issue_keys: Vec<String>,
    /// Overall bound on the run's network calls.
    pub deadline: Duration,
}

impl JiraConfig {
    /// Validates the `jira` subcommand arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::Config`] when a connection variable is
    /// missing or no issue key was given.
    pub fn from_args(args: &JiraArgs) -> Result<Self> {
        let token = required(args.token.as_deref(), "jira_token")?;
        let base_url = required(args.url.as_deref(), "jira_url")?;
        let username = required(args.username.as_deref(), "jira_username")?;
        if args.issue_keys.is_empty() {
            return Err(EvidenceError::Config("at least one issue key is required".into()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::Basic {
                username: username.to_string(),
                password: token.to_string(),
            },
            transition: args.transition.clone(),
            issue_keys: args.issue_keys.clone(),
            deadline: deadline(args.deadline)?,
        })
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EvidenceError::Config(format!("{name} is not set")))
}

fn deadline(secs: u64) -> Result<Duration> {
    if !(1..=MAX_DEADLINE_SECS).contains(&secs) {
        return Err(EvidenceError::Config(format!(
            "deadline must be between 1 and {MAX_DEADLINE_SECS} seconds, got {secs}"
        )));
    }
    Ok(Duration::from_secs(secs))
}

// Accepts `host`, `host:port`, or a pasted URL.
fn normalize_host(raw: &str) -> String {
    let host = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    host.trim_end_matches('/').to_string()
}
