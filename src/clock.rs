//! Time Source Module
//!
//! Every expiry decision in the cache compares against a clock read taken at
//! call time. The clock is injected so that TTL behavior can be tested by
//! advancing virtual time instead of sleeping.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

// == Clock Trait ==
/// A source of "now" in Unix milliseconds.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current time as milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Production clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        Utc::now().timestamp_millis() as u64
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Intended for tests and deterministic simulations: hand the same
/// `Arc<ManualClock>` to the cache and to the test, then call [`advance`]
/// to cross TTL boundaries without real delays.
///
/// [`advance`]: ManualClock::advance
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a manual clock starting at `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Moves the clock to an absolute time.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Moves the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        // Sanity: we are past 2020-01-01 in milliseconds.
        assert!(a > 1_577_836_800_000);
    }

    #[test]
    fn test_manual_clock_starts_where_told() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_ms(), 1_000);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(0);
        clock.advance(250);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 500);
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new(100);
        clock.set(42);
        assert_eq!(clock.now_ms(), 42);
    }
}
