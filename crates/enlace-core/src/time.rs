//! Time abstractions for testable timestamps.
//!
//! The relay stamps every enriched message with the current time; injecting
//! a clock keeps those timestamps deterministic under test.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Utc};

/// Clock abstraction for time operations.
///
/// Production code uses [`RealClock`]; tests can inject a controllable
/// [`TestClock`].
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant for duration measurements.
    fn now(&self) -> Instant;

    /// Returns the current system time for timestamps.
    fn now_system(&self) -> SystemTime;

    /// Returns the current wall-clock time as a UTC timestamp.
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.now_system())
    }
}

/// Real clock implementation using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Creates a new real clock instance.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn now_system(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Test clock for deterministic time control.
///
/// System time starts at construction and only moves when explicitly
/// advanced, so timestamps embedded in messages are reproducible.
#[derive(Debug, Clone)]
pub struct TestClock {
    /// System time as nanoseconds since UNIX_EPOCH.
    system_ns: Arc<AtomicU64>,
    /// Base instant for monotonic measurements.
    base_instant: Instant,
}

impl TestClock {
    /// Creates a new test clock starting at the current time.
    pub fn new() -> Self {
        let since_epoch =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();

        Self {
            system_ns: Arc::new(AtomicU64::new(
                u64::try_from(since_epoch.as_nanos().min(u128::from(u64::MAX))).unwrap_or(0),
            )),
            base_instant: Instant::now(),
        }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let ns = u64::try_from(duration.as_nanos().min(u128::from(u64::MAX))).unwrap_or(0);
        self.system_ns.fetch_add(ns, Ordering::SeqCst);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.base_instant
    }

    fn now_system(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.system_ns.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_frozen_until_advanced() {
        let clock = TestClock::new();
        let first = clock.now_system();
        let second = clock.now_system();
        assert_eq!(first, second);
    }

    #[test]
    fn advancing_moves_system_time() {
        let clock = TestClock::new();
        let before = clock.now_utc();
        clock.advance(Duration::from_secs(60));
        let after = clock.now_utc();
        assert_eq!((after - before).num_seconds(), 60);
    }
}
