//! Live clock backed by the tokio timer.

use std::time::Duration;

use crate::ports::clock::{Clock, SleepFuture};

/// Live clock that really waits.
pub struct LiveClock;

impl Clock for LiveClock {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sleeps_at_least_the_requested_time() {
        let clock = LiveClock;
        let before = std::time::Instant::now();
        clock.sleep(Duration::from_millis(20)).await;
        assert!(before.elapsed() >= Duration::from_millis(20));
    }
}
