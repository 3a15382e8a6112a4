//! Work-hours gate for the inactivity alert.
//!
//! Going idle outside working hours is not worth an alert: the engine asks
//! an [`AlertWindow`] whether `now` is inside the window before emitting one.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub trait AlertWindow: Send {
    fn contains(&self, now: NaiveDateTime) -> bool;
}

impl<F> AlertWindow for F
where
    F: Fn(NaiveDateTime) -> bool + Send,
{
    fn contains(&self, now: NaiveDateTime) -> bool {
        self(now)
    }
}

/// Half-open clock-hour range `[start_hour, end_hour)`.
///
/// When `start_hour > end_hour` the range wraps past midnight
/// (e.g. 22..6 covers a night shift).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self { start_hour: 9, end_hour: 18 }
    }
}

impl AlertWindow for WorkHours {
    fn contains(&self, now: NaiveDateTime) -> bool {
        let hour = now.hour();
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn default_window_is_nine_to_six() {
        let window = WorkHours::default();
        assert!(!window.contains(at(8, 59)));
        assert!(window.contains(at(9, 0)));
        assert!(window.contains(at(17, 59)));
        assert!(!window.contains(at(18, 0)));
    }

    #[test]
    fn window_can_wrap_midnight() {
        let window = WorkHours { start_hour: 22, end_hour: 6 };
        assert!(window.contains(at(23, 0)));
        assert!(window.contains(at(2, 30)));
        assert!(!window.contains(at(12, 0)));
    }

    #[test]
    fn empty_window_never_matches() {
        let window = WorkHours { start_hour: 10, end_hour: 10 };
        assert!(!window.contains(at(10, 0)));
    }
}
