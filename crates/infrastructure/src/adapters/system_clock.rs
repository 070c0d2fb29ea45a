//! System clock adapter

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use courier_application::ports::Clock;

/// System clock implementation using the system time.
///
/// Timestamps are truncated to milliseconds, the resolution they are
/// persisted with, so a value read back equals the value handed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_has_millisecond_resolution() {
        let now = SystemClock::new().now();
        assert!(now.timestamp() > 0);
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
