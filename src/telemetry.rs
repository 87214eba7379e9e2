//! Scoped tracing setup for a single command run.
//!
//! The subscriber is installed for the current thread only and removed when
//! the returned guard drops. Standard output is never a log target; it
//! carries the evidence document.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{EvidenceError, Result};

/// Where and how log lines are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    /// Append to this file instead of stderr.
    pub file: Option<&'a Path>,
    /// Newline-delimited JSON instead of human-readable lines.
    pub json: bool,
    /// Default to debug level when `RUST_LOG` is unset.
    pub verbose: bool,
}

/// Installs the log sink for the current thread.
///
/// `RUST_LOG` takes precedence over the `verbose` default.
///
/// # Errors
///
/// Returns [`EvidenceError::Config`] if the log file cannot be opened.
pub fn install(options: LogOptions<'_>) -> Result<DefaultGuard> {
    let level = if options.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (writer, ansi) = match options.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
                EvidenceError::Config(format!("cannot open log file {}: {e}", path.display()))
            })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = fmt::layer().with_target(false).with_ansi(ansi).with_writer(writer);
    let guard = if options.json {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(filter).with(layer.json()))
    } else {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(filter).with(layer))
    };
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_receives_logs_until_guard_drops() {
        let dir = std::env::temp_dir().join("ci_evidence_telemetry_file");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.log");

        {
            let _guard = install(LogOptions { file: Some(&path), json: true, verbose: false }).unwrap();
            tracing::warn!(stage = "poll", "inside scope");
        }
        tracing::warn!("outside scope");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("inside scope"));
        assert!(content.contains("\"stage\":\"poll\""));
        assert!(!content.contains("outside scope"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unopenable_log_file_is_config_error() {
        let path = Path::new("/nonexistent-dir/ci-evidence.log");
        let result = install(LogOptions { file: Some(path), ..LogOptions::default() });
        assert!(matches!(result, Err(EvidenceError::Config(_))));
    }
}
