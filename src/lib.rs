//! Core library entry for the `ci-evidence` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod deadline;
pub mod error;
pub mod jira;
pub mod ports;
pub mod remote;
pub mod retry;
pub mod sonar;
pub mod telemetry;

use clap::error::ErrorKind;
use clap::Parser;

pub use error::{EvidenceError, Result};

/// Run the CLI with the provided arguments.
///
/// Environment variables are first loaded from `--env-file` or, if that is
/// absent, from `.env` in the working directory when one exists.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration, or the command fails.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
    load_env_file(&args)?;

    let cli = match cli::Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(EvidenceError::Usage(err.to_string())),
    };
    commands::dispatch(&cli)
}

// Runs before clap so that env-backed arguments see the file's values.
fn load_env_file(args: &[std::ffi::OsString]) -> Result<()> {
    let explicit = args.iter().enumerate().find_map(|(i, arg)| {
        let arg = arg.to_str()?;
        if let Some(path) = arg.strip_prefix("--env-file=") {
            Some(path.into())
        } else if arg == "--env-file" {
            args.get(i + 1).cloned()
        } else {
            None
        }
    });

    match explicit {
        Some(path) => dotenvy::from_path(&path).map_err(|e| {
            EvidenceError::Config(format!(
                "cannot load env file {}: {e}",
                std::path::Path::new(&path).display()
            ))
        }),
        None => {
            dotenvy::dotenv().ok();
            Ok(())
        }
    }
}
