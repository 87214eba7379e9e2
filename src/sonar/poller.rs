//! Polls the task-status endpoint until the analysis task settles.

use std::time::Duration;

use crate::deadline::Deadline;
use crate::error::{EvidenceError, Result};
use crate::ports::clock::{Clock, SleepFuture};
use crate::ports::http::{Credentials, HttpClient, HttpRequest};
use crate::remote::get_json;
use crate::retry::{poll_until, RetryPolicy};

use super::model::{TaskEnvelope, TaskState, TaskStatus};

/// The last task snapshot observed by a poll, with the retries it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Last task snapshot read.
    pub status: TaskStatus,
    /// Retries consumed (attempts minus one).
    pub retries: u32,
}

impl PollOutcome {
    /// Returns the task if it reached `SUCCESS`.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::AnalysisNotReady`] with the last observed
    /// status otherwise.
    pub fn require_success(self) -> Result<TaskStatus> {
        if self.status.status == TaskState::Success {
            Ok(self.status)
        } else {
            Err(EvidenceError::AnalysisNotReady {
                status: self.status.status,
                retries: self.retries,
            })
        }
    }
}

// Never sleeps past the deadline; the next request then fails fast.
struct BoundedClock<'a> {
    inner: &'a dyn Clock,
    deadline: Deadline,
}

impl Clock for BoundedClock<'_> {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        let remaining = self.deadline.remaining();
        if duration > remaining {
            tracing::debug!(
                requested_secs = duration.as_secs_f64(),
                remaining_secs = remaining.as_secs_f64(),
                "shortening wait to the run deadline"
            );
        }
        self.inner.sleep(duration.min(remaining))
    }
}

/// Fetches task status with bounded retries.
pub struct StatusPoller<'a> {
    http: &'a dyn HttpClient,
    clock: &'a dyn Clock,
    policy: RetryPolicy,
    deadline: Deadline,
}

impl<'a> StatusPoller<'a> {
    /// Creates a poller over the given ports.
    #[must_use]
    pub fn new(
        http: &'a dyn HttpClient,
        clock: &'a dyn Clock,
        policy: RetryPolicy,
        deadline: Deadline,
    ) -> Self {
        Self { http, clock, policy, deadline }
    }

    /// Polls `task_url` until the task reports `SUCCESS` or the retry budget
    /// runs out.
    ///
    /// Every non-`SUCCESS` status is retried, including `FAILED` and
    /// `CANCELED`. Exhausting the budget is not an error here: the last
    /// snapshot comes back and [`PollOutcome::require_success`] decides.
    /// Waits between attempts never extend past the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::Transport`] on the first network, HTTP, or
    /// decoding failure, without retrying it, and when the deadline runs
    /// out before the budget does.
    pub async fn poll(&self, task_url: &str, credentials: &Credentials) -> Result<PollOutcome> {
        let request = HttpRequest::get(task_url, credentials.clone());
        let clock = BoundedClock { inner: self.clock, deadline: self.deadline };

        let polled = poll_until(
            &self.policy,
            &clock,
            |retry| {
                let request = &request;
                async move {
                    let envelope: TaskEnvelope =
                        get_json(self.http, &self.deadline, request).await?;
                    let task = envelope.task;
                    tracing::info!(
                        attempt = retry + 1,
                        max_attempts = self.policy.max_attempts(),
                        status = %task.status,
                        "analysis task status"
                    );
                    if !task.status.is_in_flight() && task.status != TaskState::Success {
                        tracing::warn!(status = %task.status, "task is not in flight; retrying anyway");
                    }
                    Ok::<_, EvidenceError>(task)
                }
            },
            |task| task.status == TaskState::Success,
        )
        .await?;

        if polled.settled {
            tracing::info!(retries = polled.retries, "analysis task completed");
        } else {
            tracing::warn!(
                retries = polled.retries,
                status = %polled.value.status,
                "retry budget exhausted before the analysis task completed"
            );
        }

        Ok(PollOutcome { status: polled.value, retries: polled.retries })
    }
}
