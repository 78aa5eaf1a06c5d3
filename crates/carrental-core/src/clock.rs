//! Time sources.
//!
//! The shop never calls `Utc::now()` directly; it asks its [`Clock`]. Tests
//! and the simulator swap in a [`ManualClock`] to control elapsed time.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::fmt;

/// A source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// # Examples
///
/// ```
/// use carrental_core::{Clock, ManualClock};
/// use chrono::TimeDelta;
///
/// let clock = ManualClock::starting_now();
/// let start = clock.now();
/// clock.advance(TimeDelta::hours(25));
/// assert_eq!(clock.now() - start, TimeDelta::hours(25));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Create a clock frozen at the current wall-clock time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Jump to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    /// Move the clock by `delta` (which may be negative).
    ///
    /// Stops at the earliest or latest representable instant instead of
    /// overflowing.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock();
        *now = now.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
    }

    /// Move the clock by `delta`, or leave it alone and return `None` if the
    /// result would fall outside the representable range.
    pub fn try_advance(&self, delta: TimeDelta) -> Option<DateTime<Utc>> {
        let mut now = self.now.lock();
        let next = now.checked_add_signed(delta)?;
        *now = next;
        Some(next)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
