//! Wire and evidence types for the analysis-service pipeline.
//!
//! Everything except the two status enums is passed through verbatim; the
//! pipeline never interprets condition thresholds or metric values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Progress of an asynchronous analysis task.
///
/// Unknown values are kept as [`TaskState::Other`] so they round-trip
/// unchanged into the evidence document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    /// Queued, not yet started.
    Pending,
    /// Being processed.
    InProgress,
    /// Finished; an analysis id is available.
    Success,
    /// Finished without producing an analysis.
    Failed,
    /// Cancelled before completion.
    Canceled,
    /// Any other value, including an absent status (empty string).
    Other(String),
    /// Placeholder used before any status has been observed.
    #[default]
    Unknown,
}

impl TaskState {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Other(raw) => raw,
            Self::Unknown => "",
        }
    }

    /// Whether the remote system is still expected to make progress.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl From<String> for TaskState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "IN_PROGRESS" => Self::InProgress,
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            "CANCELED" => Self::Canceled,
            "" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("<no status>"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Overall quality-gate verdict.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GateStatus {
    /// Every condition passed.
    Ok,
    /// At least one condition failed.
    Error,
    /// No quality gate applies.
    #[default]
    None,
    /// Any value the service adds later.
    Other(String),
}

impl GateStatus {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
            Self::None => "NONE",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for GateStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "OK" => Self::Ok,
            "ERROR" => Self::Error,
            "NONE" => Self::None,
            _ => Self::Other(raw),
        }
    }
}

impl From<GateStatus> for String {
    fn from(status: GateStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the remote task, as returned by the task-status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskStatus {
    /// Task progress.
    pub status: TaskState,
    /// Identifier of the produced analysis; set once the task succeeds.
    pub analysis_id: String,
    /// Internal id of the analysed component.
    pub component_id: String,
    /// Project key of the analysed component.
    pub component_key: String,
    /// Display name of the analysed component.
    pub component_name: String,
    /// Owning organization.
    pub organization: String,
    /// When the analysis was submitted.
    pub submitted_at: String,
    /// Who submitted the analysis.
    pub submitter_login: String,
    /// When processing started.
    pub started_at: String,
    /// When processing finished.
    pub executed_at: String,
}

/// Envelope of the task-status endpoint: `{"task": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskEnvelope {
    /// The task snapshot.
    pub task: TaskStatus,
}

/// One metric condition of a quality gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    /// Condition outcome (`OK`, `ERROR`, ...).
    pub status: String,
    /// Metric the condition applies to.
    pub metric_key: String,
    /// Comparison operator (`GT`, `LT`, ...).
    pub comparator: String,
    /// Index into the verdict's periods.
    pub period_index: i64,
    /// Threshold that triggers an error.
    pub error_threshold: String,
    /// Measured value.
    pub actual_value: String,
}

/// A comparison period referenced by conditions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    /// Period index.
    pub index: i64,
    /// How the period baseline is chosen (`previous_version`, ...).
    pub mode: String,
    /// Baseline date.
    pub date: String,
}

/// Quality-gate verdict for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityGateVerdict {
    /// Overall verdict.
    pub status: GateStatus,
    /// Individual metric conditions, in service order.
    pub conditions: Vec<Condition>,
    /// Comparison periods, in service order.
    pub periods: Vec<Period>,
    /// Whether some conditions were ignored by the service.
    pub ignored_conditions: bool,
}

/// Envelope of the quality-gate endpoint: `{"projectStatus": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusEnvelope {
    /// The verdict.
    pub project_status: QualityGateVerdict,
}

/// The evidence document written to standard output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDocument {
    /// Final task snapshot.
    pub task: TaskStatus,
    /// Quality-gate verdict for the task's analysis.
    pub analysis: QualityGateVerdict,
}

impl EvidenceDocument {
    /// Serializes the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
