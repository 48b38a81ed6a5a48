//! Wall-clock source for event timestamps.
//!
//! Game time never comes from here: every timed behaviour advances through
//! `update(dt)`. The clock only fills `occurred_at` on recorded events.

use chrono::{DateTime, Utc};

/// Supplies the `occurred_at` stamp for recorded events.
pub trait Clock: Send + Sync {
    /// The instant to stamp on the next event.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock. Used by the driver binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
