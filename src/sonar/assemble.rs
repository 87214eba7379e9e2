//! Combines the final task snapshot and verdict into the evidence document.

use crate::error::{EvidenceError, Result};

use super::model::{EvidenceDocument, GateStatus, QualityGateVerdict, TaskStatus};

/// Builds the evidence document, or fails with [`EvidenceError::GateFailed`]
/// when `fail_on_analysis_failure` is set and the gate is not `OK`.
///
/// # Errors
///
/// Returns [`EvidenceError::GateFailed`] under the strict policy only.
pub fn assemble(
    task: TaskStatus,
    analysis: QualityGateVerdict,
    fail_on_analysis_failure: bool,
) -> Result<EvidenceDocument> {
    if fail_on_analysis_failure && analysis.status != GateStatus::Ok {
        return Err(EvidenceError::GateFailed { status: analysis.status });
    }
    if analysis.status != GateStatus::Ok {
        tracing::warn!(gate = %analysis.status, "quality gate did not pass; emitting evidence anyway");
    }
    Ok(EvidenceDocument { task, analysis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sonar::model::TaskState;

    fn task() -> TaskStatus {
        TaskStatus { status: TaskState::Success, analysis_id: "A1".into(), ..TaskStatus::default() }
    }

    fn verdict(status: GateStatus) -> QualityGateVerdict {
        QualityGateVerdict { status, ..QualityGateVerdict::default() }
    }

    #[test]
    fn lenient_policy_keeps_failed_gate() {
        let doc = assemble(task(), verdict(GateStatus::Error), false).unwrap();
        assert_eq!(doc.analysis.status, GateStatus::Error);
        assert_eq!(doc.task.analysis_id, "A1");
    }

    #[test]
    fn strict_policy_rejects_failed_gate() {
        let err = assemble(task(), verdict(GateStatus::Error), true).unwrap_err();
        assert!(matches!(err, EvidenceError::GateFailed { status: GateStatus::Error }));
    }

    #[test]
    fn strict_policy_rejects_missing_gate() {
        let err = assemble(task(), verdict(GateStatus::None), true).unwrap_err();
        assert!(matches!(err, EvidenceError::GateFailed { status: GateStatus::None }));
    }

    #[test]
    fn strict_policy_passes_ok_gate() {
        assert!(assemble(task(), verdict(GateStatus::Ok), true).is_ok());
    }
}
