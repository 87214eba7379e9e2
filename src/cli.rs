//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_DESCRIPTOR_PATH;

/// Top-level CLI parser for `ci-evidence`.
#[derive(Debug, Parser)]
#[command(
    name = "ci-evidence",
    version,
    about = "Collect quality-gate and issue-transition evidence for CI pipelines"
)]
pub struct Cli {
    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as newline-delimited JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load environment variables from this file instead of `.env`.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wait for a code analysis and print its quality-gate evidence.
    Sonar(SonarArgs),
    /// Check issues for a workflow transition and print the evidence.
    Jira(JiraArgs),
}

/// Arguments of `ci-evidence sonar`.
#[derive(Debug, Args)]
pub struct SonarArgs {
    /// Scanner descriptor file holding `ceTaskUrl`.
    #[arg(
        env = "SONAR_REPORT_TASK_FILE",
        value_name = "REPORT_TASK_FILE",
        default_value = DEFAULT_DESCRIPTOR_PATH
    )]
    pub report_task_file: PathBuf,

    /// Analysis service token.
    #[arg(long, env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Deployment mode: SAAS or SELFHOSTED.
    #[arg(long, env = "SONAR_TYPE", default_value = "SAAS")]
    pub mode: String,

    /// Server host for SELFHOSTED mode.
    #[arg(long, env = "SONAR_HOST")]
    pub host: Option<String>,

    /// Fail instead of printing evidence when the quality gate is not OK.
    #[arg(long, env = "SONAR_FAIL_ON_ANALYSIS_FAILURE")]
    pub fail_on_analysis_failure: bool,

    /// Status polls allowed after the first one.
    #[arg(long, env = "SONAR_MAX_RETRIES", default_value_t = 3)]
    pub max_retries: u32,

    /// Seconds to wait between status polls.
    #[arg(long, env = "SONAR_WAIT_TIME", default_value_t = 5)]
    pub wait_time: u64,

    /// Seconds before any pending network call is abandoned.
    #[arg(long, env = "SONAR_DEADLINE", default_value_t = 30)]
    pub deadline: u64,
}

/// Arguments of `ci-evidence jira`.
#[derive(Debug, Args)]
pub struct JiraArgs {
    /// Status name the issues must have transitioned to.
    #[arg(value_name = "TRANSITION")]
    pub transition: String,

    /// Issue keys to check.
    #[arg(value_name = "JIRA_ID", required = true, num_args = 1..)]
    pub issue_keys: Vec<String>,

    /// Issue tracker base URL.
    #[arg(long, env = "jira_url")]
    pub url: Option<String>,

    /// Issue tracker user name.
    #[arg(long, env = "jira_username")]
    pub username: Option<String>,

    /// Issue tracker API token.
    #[arg(long, env = "jira_token", hide_env_values = true)]
    pub token: Option<String>,

    /// Seconds before any pending network call is abandoned.
    #[arg(long, env = "JIRA_DEADLINE", default_value_t = 30)]
    pub deadline: u64,
}
