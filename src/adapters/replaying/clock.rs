//! Replaying clock that never waits.

use std::sync::Mutex;
use std::time::Duration;

use crate::ports::clock::{Clock, SleepFuture};

/// Resolves every sleep immediately and remembers what was requested.
///
/// Replayed runs and tests use this so retry loops complete instantly
/// while the requested intervals stay observable.
#[derive(Default)]
pub struct ReplayingClock {
    requested: Mutex<Vec<Duration>>,
}

impl ReplayingClock {
    /// Creates a clock with no recorded sleeps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every duration passed to [`Clock::sleep`], in call order.
    #[must_use]
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().expect("clock lock poisoned").clone()
    }
}

impl Clock for ReplayingClock {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        self.requested.lock().expect("clock lock poisoned").push(duration);
        Box::pin(std::future::ready(()))
    }
}
