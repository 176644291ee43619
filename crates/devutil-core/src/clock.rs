//! Wall-clock capability.
//!
//! Time-dependent operations take a `&impl Clock` instead of reading the
//! system time themselves, so tests can pin the instant (the RFC 6238
//! vectors fix `T` explicitly).

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of "now" as a duration since the Unix epoch.
pub trait Clock {
    /// Time elapsed since 1970-01-01T00:00:00Z.
    fn now(&self) -> Duration;

    /// Whole seconds since the epoch.
    fn unix_seconds(&self) -> u64 {
        self.now().as_secs()
    }

    /// Whole milliseconds since the epoch, saturating at `u64::MAX`.
    fn unix_millis(&self) -> u64 {
        u64::try_from(self.now().as_millis()).unwrap_or(u64::MAX)
    }
}

/// The operating system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    /// A clock set before 1970 reads as the epoch itself.
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(Duration);

impl FixedClock {
    #[must_use]
    pub const fn from_unix_seconds(seconds: u64) -> Self {
        Self(Duration::from_secs(seconds))
    }

    #[must_use]
    pub const fn from_unix_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Duration {
        self.0
    }
}
