//! Clock port for waiting between poll attempts.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future type alias used by [`Clock`] to keep the trait dyn-compatible.
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Suspends the caller for a fixed interval.
///
/// Abstracting the wait allows replayed runs and tests to skip real
/// sleeping while still observing how long the caller asked to wait.
pub trait Clock: Send + Sync {
    /// Waits for `duration` before resolving.
    fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}
