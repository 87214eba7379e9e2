//! A single wall-clock bound shared by every network call of a run.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{EvidenceError, Result};

// Stand-in for budgets too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Absolute point in time after which no network call may still be waiting.
///
/// Independent of the retry budget: whichever runs out first ends the poll.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a deadline that expires `budget` from now.
    ///
    /// Budgets past the clock's range saturate instead of overflowing.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let at = now.checked_add(budget).unwrap_or_else(|| now + FAR_FUTURE);
        Self { at, budget }
    }

    /// Time left before expiry, zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Awaits `request`, aborting with a transport error for `url` if the
    /// deadline passes first. An already expired deadline fails without
    /// polling `request` at all.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::Transport`] when the deadline expires.
    pub async fn guard<F: Future>(&self, url: &str, request: F) -> Result<F::Output> {
        if self.is_expired() {
            return Err(self.exceeded(url));
        }
        tokio::time::timeout_at(self.at, request).await.map_err(|_| self.exceeded(url))
    }

    fn exceeded(&self, url: &str) -> EvidenceError {
        EvidenceError::unreachable(url, format!("run deadline of {}s exceeded", self.budget.as_secs()))
    }
}
