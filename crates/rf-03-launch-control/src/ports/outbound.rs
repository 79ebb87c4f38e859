//! Outbound (Driven) ports for the Launch Control subsystem.

use chrono::{DateTime, Utc};

/// Time source for launch timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Default system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct MockClock {
    now: DateTime<Utc>,
}

#[cfg(test)]
impl MockClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

#[cfg(test)]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
