//! Terminal presentation of engine state and notifications.
//!
//! The engine only produces [`Notification`] records tagged with a
//! [`NotificationKind`]; how each kind looks (accent colour, toast or
//! break overlay, emphasis) is decided here by pure mapping functions.

use crate::libs::config::Config;
use crate::libs::engine::{ActivityEngine, Mode, Thresholds};
use crate::libs::formatter::{format_duration, format_short};
use crate::libs::notification::{Notification, NotificationKind};
use chrono::{Duration, NaiveDateTime};
use prettytable::{row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREEN: Rgb = Rgb(0xA6, 0xE3, 0xA1);
pub const YELLOW: Rgb = Rgb(0xF9, 0xE2, 0xAF);
pub const RED: Rgb = Rgb(0xF3, 0x8B, 0xA8);
pub const BLUE: Rgb = Rgb(0x89, 0xB4, 0xFA);
pub const GRAY: Rgb = Rgb(0x6C, 0x70, 0x86);

/// How a notification is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupStyle {
    /// Small card that doesn't interrupt work.
    Toast,
    /// Full-screen prompt suggesting a break.
    BreakOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub accent: Rgb,
    pub style: PopupStyle,
    /// Larger, louder rendering.
    pub emphasized: bool,
}

pub fn presentation(kind: NotificationKind) -> Presentation {
    match kind {
        NotificationKind::WelcomeBack => Presentation {
            accent: GREEN,
            style: PopupStyle::Toast,
            emphasized: false,
        },
        NotificationKind::SoftReminder => Presentation {
            accent: YELLOW,
            style: PopupStyle::BreakOverlay,
            emphasized: false,
        },
        NotificationKind::HardReminder => Presentation {
            accent: RED,
            style: PopupStyle::BreakOverlay,
            emphasized: false,
        },
        NotificationKind::ShortBreak => Presentation {
            accent: BLUE,
            style: PopupStyle::Toast,
            emphasized: false,
        },
        NotificationKind::InactivityAlert => Presentation {
            accent: RED,
            style: PopupStyle::Toast,
            emphasized: true,
        },
    }
}

pub fn mode_color(mode: Mode) -> Rgb {
    match mode {
        Mode::Active => GREEN,
        Mode::ShortBreak => YELLOW,
        Mode::Inactive => RED,
    }
}

/// Colour of the session timer: green, then yellow past the first
/// reminder, red past the second.
pub fn session_color(session: Duration, thresholds: &Thresholds) -> Rgb {
    if session >= thresholds.hard_limit {
        RED
    } else if session >= thresholds.soft_limit {
        YELLOW
    } else {
        GREEN
    }
}

pub fn paint(text: &str, color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", color.0, color.1, color.2, text)
}

/// Multi-line terminal card for a notification.
pub fn notification_card(notification: &Notification) -> String {
    let look = presentation(notification.kind);
    let bar = paint("┃", look.accent);

    let title = match (look.style, look.emphasized) {
        (_, true) => format!("\x1b[1m{}\x1b[0m", notification.title.to_uppercase()),
        (PopupStyle::BreakOverlay, false) => format!("\x1b[1m{}\x1b[0m", notification.title),
        (PopupStyle::Toast, false) => notification.title.clone(),
    };

    let mut lines = vec![format!("{} {}", bar, title), format!("{} {}", bar, notification.primary_message)];
    if let Some(secondary) = &notification.secondary_message {
        lines.push(format!("{} {}", bar, secondary));
    }
    if let Some(quote) = &notification.quote {
        lines.push(format!("{} \x1b[3m\"{}\"\x1b[0m", bar, quote));
    }
    lines.join("\n")
}

pub struct View {}

impl View {
    pub fn notification(notification: &Notification) {
        println!("\n{}\n", notification_card(notification));
    }

    /// One-line live status, coloured by mode and session length.
    pub fn status_line(engine: &ActivityEngine, now: NaiveDateTime) -> String {
        let mode = engine.mode();
        let session = engine.current_session_duration_at(now);
        format!(
            "{} | session: {} | worked: {} | away: {}",
            paint(&mode.to_string(), mode_color(mode)),
            paint(&format_short(&session), session_color(session, &engine.thresholds())),
            format_short(&engine.display_worked_total()),
            format_short(&engine.display_away_total_at(now)),
        )
    }

    pub fn summary(engine: &ActivityEngine, now: NaiveDateTime) {
        let mut table = Table::new();

        table.add_row(row!["MODE", "SESSION", "WORKED", "AWAY"]);
        table.add_row(row![
            engine.mode(),
            format_duration(&engine.current_session_duration_at(now)),
            format_duration(&engine.display_worked_total()),
            format_duration(&engine.display_away_total_at(now))
        ]);
        table.printstd();
    }

    pub fn config(config: &Config) {
        let thresholds = config.thresholds.unwrap_or_default();
        let window = config.alert_window();
        let telegram = if config.telegram().is_ready() { "on" } else { "off" };

        let mut table = Table::new();
        table.add_row(row!["SETTING", "VALUE"]);
        table.add_row(row!["First reminder", format!("{} min", thresholds.soft_limit)]);
        table.add_row(row!["Second reminder", format!("{} min", thresholds.hard_limit)]);
        table.add_row(row!["Short break after", format!("{} min idle", thresholds.short_break_idle)]);
        table.add_row(row!["Inactive after", format!("{} min idle", thresholds.inactivity_idle)]);
        table.add_row(row!["Alert hours", format!("{:02}:00-{:02}:00", window.start_hour, window.end_hour)]);
        table.add_row(row!["Telegram", telegram]);
        table.printstd();
    }
}
