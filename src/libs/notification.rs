//! Notification records produced by the activity engine.
//!
//! A [`Notification`] is a plain data record: the engine decides *that*
//! something should be announced and fills in the texts, while rendering
//! and outbound delivery belong to the consumer shell.

use crate::libs::formatter::format_human;
use chrono::Duration;
use std::fmt;

/// The kind of event a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The user came back after a short break or a period of inactivity.
    WelcomeBack,
    /// First reminder: the current work stretch crossed the soft limit.
    SoftReminder,
    /// Second reminder: the current work stretch crossed the hard limit.
    HardReminder,
    /// Input stopped long enough to count as a short break.
    ShortBreak,
    /// Input stopped long enough to count as fully away.
    InactivityAlert,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single event emitted by [`ActivityEngine::evaluate`](crate::libs::engine::ActivityEngine::evaluate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub primary_message: String,
    pub secondary_message: Option<String>,
    pub quote: Option<String>,
    /// Whether the shell should forward `outbound_text` to the messaging channel.
    pub send_outbound: bool,
    pub outbound_text: Option<String>,
    /// Deliver the outbound message without a sound/alert on the receiving side.
    pub outbound_silent: bool,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, primary_message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            primary_message,
            secondary_message: None,
            quote: None,
            send_outbound: false,
            outbound_text: None,
            outbound_silent: false,
        }
    }

    fn with_secondary(mut self, text: String) -> Self {
        self.secondary_message = Some(text);
        self
    }

    fn with_quote(mut self, quote: Option<String>) -> Self {
        self.quote = quote;
        self
    }

    fn with_outbound(mut self, text: String, silent: bool) -> Self {
        self.send_outbound = true;
        self.outbound_text = Some(text);
        self.outbound_silent = silent;
        self
    }

    /// Closes an away stretch: how long the user was gone and the running total.
    pub fn welcome_back(away: Duration, total_away: Duration, quote: Option<String>) -> Self {
        Self::new(
            NotificationKind::WelcomeBack,
            "Welcome back!",
            format!("You were away for {}", format_human(&away)),
        )
        .with_secondary(format!("Total time away: {}", format_human(&total_away)))
        .with_quote(quote)
    }

    pub fn soft_reminder(worked: Duration) -> Self {
        Self::new(
            NotificationKind::SoftReminder,
            "Time for a break!",
            format!("You have been working for {}", format_human(&worked)),
        )
    }

    pub fn hard_reminder(worked: Duration) -> Self {
        Self::new(
            NotificationKind::HardReminder,
            "Time for a break!",
            format!("You have been working for {}", format_human(&worked)),
        )
        .with_outbound("Take a break!".to_string(), false)
    }

    /// Closes a work stretch. The outbound copy is sent silently.
    pub fn short_break(stretch: Duration, total_worked: Duration) -> Self {
        Self::new(
            NotificationKind::ShortBreak,
            "Short break",
            format!("You worked {}.", format_human(&stretch)),
        )
        .with_secondary(format!("Total worked: {}", format_human(&total_worked)))
        .with_outbound("Short break is over!".to_string(), true)
    }

    pub fn inactivity_alert(inactivity_idle: Duration, quote: Option<String>) -> Self {
        let idle = format_human(&inactivity_idle);
        let mut outbound = format!("Get back to work! {} have passed", idle);
        if let Some(quote) = &quote {
            outbound.push('\n');
            outbound.push_str(quote);
        }

        Self::new(NotificationKind::InactivityAlert, "Get back to work!", format!("{} have passed", idle))
            .with_quote(quote)
            .with_outbound(outbound, false)
    }
}
