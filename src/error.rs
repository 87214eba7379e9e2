//! Error types shared by every evidence pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::sonar::model::{GateStatus, TaskState};

/// Failures that abort an evidence run.
///
/// None of these ever produce a partial evidence document; the command layer
/// turns any of them into a non-zero exit status.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// The descriptor file is missing or unreadable.
    #[error("descriptor file {} could not be read: {reason}", .path.display())]
    NotFound {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// The descriptor file has no usable entry for the required key.
    #[error("descriptor file {} has no {key} entry", .path.display())]
    MalformedDescriptor {
        /// Path that was read.
        path: PathBuf,
        /// The key that was expected.
        key: &'static str,
    },

    /// A network, HTTP, or decoding failure on a remote endpoint.
    ///
    /// `body` holds the raw response for diagnostics; `Display` leaves it out.
    #[error("request to {url} failed{}: {reason}", .status.map(|s| format!(" with HTTP {s}")).unwrap_or_default())]
    Transport {
        /// URL that was requested.
        url: String,
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Short description of the failure.
        reason: String,
        /// Raw response body, when one was received.
        body: Option<String>,
    },

    /// The analysis task never reached `SUCCESS` within the retry budget.
    #[error("analysis task is {status} after {retries} retries")]
    AnalysisNotReady {
        /// Last observed task status.
        status: TaskState,
        /// Retries consumed before giving up.
        retries: u32,
    },

    /// The quality gate did not pass and the caller asked to fail on that.
    #[error("quality gate status is {status}, failing as requested by --fail-on-analysis-failure")]
    GateFailed {
        /// Verdict status reported by the analysis service.
        status: GateStatus,
    },

    /// Configuration is missing or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Command-line arguments could not be parsed.
    #[error("{0}")]
    Usage(String),

    /// The evidence document could not be serialized.
    #[error("failed to encode evidence document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl EvidenceError {
    /// Builds a transport error for a request that never produced a response.
    pub(crate) fn unreachable(url: &str, reason: impl Into<String>) -> Self {
        Self::Transport { url: url.to_string(), status: None, reason: reason.into(), body: None }
    }
}

/// Result type for evidence operations.
pub type Result<T> = std::result::Result<T, EvidenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_omits_body() {
        let err = EvidenceError::Transport {
            url: "https://sonar.example/api/ce/task".into(),
            status: Some(500),
            reason: "unexpected status".into(),
            body: Some("secret stack trace".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 500"));
        assert!(msg.contains("https://sonar.example/api/ce/task"));
        assert!(!msg.contains("secret stack trace"));
    }

    #[test]
    fn unreachable_has_no_status() {
        let err = EvidenceError::unreachable("https://x/task", "connection refused");
        assert_eq!(err.to_string(), "request to https://x/task failed: connection refused");
    }

    #[test]
    fn not_ready_names_status_and_retries() {
        let err = EvidenceError::AnalysisNotReady { status: TaskState::InProgress, retries: 2 };
        assert_eq!(err.to_string(), "analysis task is IN_PROGRESS after 2 retries");
    }
}
