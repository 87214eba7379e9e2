//! Command dispatch and handlers.

pub mod jira;
pub mod sonar;

use std::env;
use std::io::Write;
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;
use crate::error::{EvidenceError, Result};
use crate::telemetry::{self, LogOptions};

/// Env var naming a cassette file to record live interactions into.
pub const RECORD_ENV: &str = "CI_EVIDENCE_RECORD";
/// Env var naming a cassette file to replay interactions from.
pub const REPLAY_ENV: &str = "CI_EVIDENCE_REPLAY";

/// Dispatch a parsed command to its handler and print its evidence.
///
/// The evidence document goes to stdout only when the handler succeeds.
/// When `CI_EVIDENCE_RECORD` is set, port interactions are written to that
/// cassette; `CI_EVIDENCE_REPLAY` serves them from one instead.
///
/// # Errors
///
/// Returns the handler's error, or a configuration error if logging, the
/// service context, or the runtime cannot be set up.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let _log = telemetry::install(LogOptions {
        file: cli.log_file.as_deref(),
        json: cli.log_json,
        verbose: cli.verbose,
    })?;

    let result = run_logged(cli);
    if let Err(err) = &result {
        tracing::error!(error = %err, "evidence run failed");
    }
    result
}

fn run_logged(cli: &Cli) -> Result<()> {
    let ctx = context_from_env()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| EvidenceError::Config(format!("failed to start async runtime: {e}")))?;

    let document = runtime.block_on(dispatch_with_context(&cli.command, &ctx))?;
    // Flush the cassette before emitting output.
    drop(ctx);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{document}")
        .and_then(|()| stdout.flush())
        .map_err(|e| EvidenceError::Config(format!("failed to write evidence to stdout: {e}")))
}

/// Run a command with the given service context, returning its JSON evidence.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<String> {
    match command {
        Command::Sonar(args) => sonar::run(ctx, args).await,
        Command::Jira(args) => jira::run(ctx, args).await,
    }
}

fn context_from_env() -> Result<ServiceContext> {
    if let Some(path) = env_path(REPLAY_ENV) {
        tracing::info!(cassette = %path.display(), "replaying interactions");
        ServiceContext::replaying(&path)
    } else if let Some(path) = env_path(RECORD_ENV) {
        tracing::info!(cassette = %path.display(), "recording interactions");
        ServiceContext::recording(&path)
    } else {
        ServiceContext::live()
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}
