//! Bounded fixed-interval retry.

use std::future::Future;
use std::time::Duration;

use crate::ports::clock::Clock;

/// How many extra attempts a poll may make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first one. `0` means a single attempt.
    pub max_retries: u32,
    /// Fixed wait between consecutive attempts.
    pub wait_time: Duration,
}

impl RetryPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(max_retries: u32, wait_time: Duration) -> Self {
        Self { max_retries, wait_time }
    }

    /// Total number of attempts the policy permits.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before retry number `retry` (1-based). Fixed interval.
    #[must_use]
    pub const fn delay_before(&self, _retry: u32) -> Duration {
        self.wait_time
    }
}

/// Result of a bounded poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polled<T> {
    /// The last value observed.
    pub value: T,
    /// Retries consumed (attempts minus one).
    pub retries: u32,
    /// Whether `value` satisfied the terminal predicate. `false` means the
    /// budget ran out first.
    pub settled: bool,
}

/// Repeatedly runs `attempt` until `is_terminal` accepts its value or the
/// retry budget is spent.
///
/// `attempt` receives the number of retries consumed so far. An `Err` from
/// `attempt` aborts immediately and is never retried. Budget exhaustion is
/// not an error: the last value comes back with `settled == false`.
///
/// # Errors
///
/// Returns the first error produced by `attempt`.
pub async fn poll_until<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    clock: &dyn Clock,
    mut attempt: F,
    is_terminal: P,
) -> Result<Polled<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&T) -> bool,
{
    let mut retries = 0;
    loop {
        let value = attempt(retries).await?;
        if is_terminal(&value) {
            return Ok(Polled { value, retries, settled: true });
        }
        if retries >= policy.max_retries {
            return Ok(Polled { value, retries, settled: false });
        }
        retries += 1;
        let delay = policy.delay_before(retries);
        tracing::debug!(retry = retries, delay_secs = delay.as_secs_f64(), "waiting before retry");
        clock.sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingClock;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn zero_budget_makes_one_attempt_without_sleeping() {
        let clock = ReplayingClock::new();
        let mut calls = 0;
        let polled = poll_until(
            &policy(0),
            &clock,
            |_| {
                calls += 1;
                async { Ok::<_, String>("PENDING") }
            },
            |s| *s == "SUCCESS",
        )
        .await
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(polled, Polled { value: "PENDING", retries: 0, settled: false });
        assert!(clock.requested().is_empty());
    }

    #[tokio::test]
    async fn terminal_on_first_attempt_never_waits() {
        let clock = ReplayingClock::new();
        let polled = poll_until(&policy(3), &clock, |_| async { Ok::<_, String>(1) }, |v| *v == 1)
            .await
            .unwrap();
        assert!(polled.settled);
        assert_eq!(polled.retries, 0);
        assert!(clock.requested().is_empty());
    }

    #[tokio::test]
    async fn settles_after_exact_retry_count() {
        let clock = ReplayingClock::new();
        let polled = poll_until(
            &policy(5),
            &clock,
            |retry| async move { Ok::<_, String>(retry) },
            |retry| *retry == 2,
        )
        .await
        .unwrap();

        assert_eq!(polled, Polled { value: 2, retries: 2, settled: true });
        assert_eq!(clock.requested(), vec![Duration::from_secs(5); 2]);
    }

    #[tokio::test]
    async fn exhaustion_returns_last_value() {
        for budget in 0..4 {
            let clock = ReplayingClock::new();
            let polled = poll_until(
                &policy(budget),
                &clock,
                |retry| async move { Ok::<_, String>(retry) },
                |_| false,
            )
            .await
            .unwrap();

            assert_eq!(polled.value, budget);
            assert_eq!(polled.retries, budget);
            assert!(!polled.settled);
            assert_eq!(clock.requested().len(), budget as usize);
        }
    }

    #[tokio::test]
    async fn error_aborts_without_retry() {
        let clock = ReplayingClock::new();
        let mut calls = 0;
        let result: Result<Polled<u32>, String> = poll_until(
            &policy(3),
            &clock,
            |_| {
                calls += 1;
                async { Err("HTTP 500".to_string()) }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap_err(), "HTTP 500");
        assert_eq!(calls, 1);
        assert!(clock.requested().is_empty());
    }

    #[test]
    fn max_attempts_counts_the_first_try() {
        assert_eq!(policy(0).max_attempts(), 1);
        assert_eq!(policy(2).max_attempts(), 3);
        assert_eq!(policy(u32::MAX).max_attempts(), u32::MAX);
    }
}
