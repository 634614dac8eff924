//! Timestamp sources for request signing.
//!
//! The platform rejects tokens whose timestamp drifts too far from its own
//! clock, so the client reads a fresh value for every request.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing the millisecond timestamp embedded in each token.
pub trait TimestampProvider: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall-clock timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl TimestampProvider for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// A clock frozen at one instant.
///
/// Useful for reproducing a token exactly, e.g. in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl TimestampProvider for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_milliseconds() {
        let now = SystemClock::new().now_millis();
        // 2020-01-01 and 2100-01-01 in milliseconds.
        assert!(now > 1_577_836_800_000);
        assert!(now < 4_102_444_800_000);
    }

    #[test]
    fn test_system_clock_not_decreasing() {
        let clock = SystemClock;
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(1557218157315);
        assert_eq!(clock.now_millis(), 1557218157315);
        assert_eq!(clock.now_millis(), 1557218157315);
    }
}
