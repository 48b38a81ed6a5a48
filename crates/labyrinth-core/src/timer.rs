//! Fire-and-forget countdowns for cosmetic delays.

/// Counts down seconds of game time and fires once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
    fired: bool,
}

impl Countdown {
    /// Starts a countdown of `seconds`. Non-positive durations fire on the
    /// first tick.
    #[must_use]
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
            fired: false,
        }
    }

    /// Advances by `dt` seconds. Returns `true` exactly once, on the tick the
    /// countdown elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    /// Seconds left before firing.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// Whether the countdown already fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
