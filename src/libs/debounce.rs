//! Rate limit for raw input pulses.
//!
//! A burst of key presses or mouse moves produces hundreds of hook callbacks
//! per second. The [`Debouncer`] lets at most one through per window and
//! drops the rest; dropped pulses are not queued.

use std::time::{Duration, Instant};

/// Minimum spacing between two accepted activity pulses.
pub const ACTIVITY_THROTTLE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(ACTIVITY_THROTTLE)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Returns `true` if a pulse at `now` should reach the engine.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}
