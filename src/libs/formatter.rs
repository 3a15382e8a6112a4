//! Time duration formatting utilities for user-friendly display.
//!
//! Three renderings are provided, each used in a different place:
//!
//! - [`format_human`]: full sentence form used inside notification texts
//!   ("12 minutes", "1 hour 5 minutes", "45 seconds").
//! - [`format_short`]: compact form used by the live status line
//!   ("7 min", "2 h 15 min", "3 h").
//! - [`format_duration`]: "HH:MM" clock form used by summary tables.
//!
//! All functions treat negative durations as zero, so a clock that jumps
//! backwards can never produce garbage output.
//!
//! ## Examples
//!
//! ```rust
//! use workcheck::libs::formatter::{format_duration, format_human, format_short};
//! use chrono::Duration;
//!
//! let duration = Duration::hours(2) + Duration::minutes(30);
//! assert_eq!(format_duration(&duration), "02:30");
//! assert_eq!(format_human(&duration), "2 hours 30 minutes");
//! assert_eq!(format_short(&duration), "2 h 30 min");
//! ```

use chrono::Duration;

/// Formats a chrono::Duration into a standardized "HH:MM" string.
///
/// Hours are zero-padded to at least 2 digits, seconds are dropped and
/// negative durations are rendered as "00:00".
///
/// # Examples
///
/// ```rust
/// use workcheck::libs::formatter::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(&Duration::hours(8)), "08:00");
/// assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
/// assert_eq!(format_duration(&Duration::hours(-1)), "00:00");
/// ```
pub fn format_duration(duration: &Duration) -> String {
    let duration = non_negative(duration);
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours, mins)
}

/// Formats a duration as readable text with singular/plural units.
///
/// - under a minute: whole seconds ("1 second", "45 seconds")
/// - under an hour: whole minutes ("1 minute", "59 minutes")
/// - otherwise: hours, plus minutes when there are any ("2 hours 5 minutes")
pub fn format_human(duration: &Duration) -> String {
    let duration = non_negative(duration);

    if duration.num_seconds() < 60 {
        let secs = duration.num_seconds();
        return format!("{} {}", secs, plural(secs, "second", "seconds"));
    }

    if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        return format!("{} {}", mins, plural(mins, "minute", "minutes"));
    }

    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    let mut text = format!("{} {}", hours, plural(hours, "hour", "hours"));
    if mins > 0 {
        text.push_str(&format!(" {} {}", mins, plural(mins, "minute", "minutes")));
    }
    text
}

/// Formats a duration for the status line: "N min" below one hour,
/// "H h M min" or "H h" above.
pub fn format_short(duration: &Duration) -> String {
    let duration = non_negative(duration);
    let total_minutes = duration.num_minutes();

    if total_minutes < 60 {
        return format!("{} min", total_minutes);
    }

    let hours = duration.num_hours();
    let mins = total_minutes % 60;
    if mins > 0 {
        format!("{} h {} min", hours, mins)
    } else {
        format!("{} h", hours)
    }
}

fn non_negative(duration: &Duration) -> Duration {
    if *duration < Duration::zero() {
        Duration::zero()
    } else {
        *duration
    }
}

fn plural(n: i64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_picks_singular_only_for_one() {
        assert_eq!(plural(1, "hour", "hours"), "hour");
        assert_eq!(plural(0, "hour", "hours"), "hours");
        assert_eq!(plural(21, "hour", "hours"), "hours");
    }

    #[test]
    fn non_negative_clamps() {
        assert_eq!(non_negative(&Duration::seconds(-5)), Duration::zero());
        assert_eq!(non_negative(&Duration::seconds(5)), Duration::seconds(5));
    }
}
