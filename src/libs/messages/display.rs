//! Display implementation for workcheck application messages.
//!
//! All message text is defined here, in one match, so wording stays
//! consistent and a new [`Message`] variant cannot be added without
//! deciding how it reads.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNothingToDelete => "No configuration file to delete".to_string(),
            Message::ConfigReadFailed(error) => format!("Failed to read configuration, using defaults: {}", error),
            Message::ConfigModuleThresholds => "Reminder thresholds (minutes)".to_string(),
            Message::ConfigModuleAlertWindow => "Inactivity alert hours".to_string(),
            Message::ConfigModuleTelegram => "Telegram notifications".to_string(),
            Message::ConfigHeader(path) => format!("Configuration ({})", path),
            Message::HardLimitBelowSoftLimit { soft, hard } => format!(
                "Second reminder ({} min) is earlier than the first one ({} min); both will fire together",
                hard, soft
            ),
            Message::ShortBreakNotBeforeInactivity { short_break, inactivity } => format!(
                "Short break after {} idle min is not before inactivity after {} min; idle time will skip the short break",
                short_break, inactivity
            ),
            Message::InvalidAlertHour(hour) => format!("Hour must be between 0 and 24, got {}", hour),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select settings to configure (space to select, enter to confirm)".to_string(),
            Message::PromptSoftLimit => "First break reminder after (minutes of work)".to_string(),
            Message::PromptHardLimit => "Second break reminder after (minutes of work)".to_string(),
            Message::PromptShortBreakIdle => "Idle minutes counted as a short break".to_string(),
            Message::PromptInactivityIdle => "Idle minutes counted as inactivity".to_string(),
            Message::PromptAlertStartHour => "Inactivity alerts from hour".to_string(),
            Message::PromptAlertEndHour => "Inactivity alerts until hour".to_string(),
            Message::PromptTelegramEnabled => "Send alerts to Telegram?".to_string(),
            Message::PromptTelegramBotToken => "Telegram bot token".to_string(),
            Message::PromptTelegramChatId => "Telegram chat id".to_string(),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted {
                soft_limit,
                hard_limit,
                short_break_idle,
                inactivity_idle,
            } => format!(
                "Watching activity. Reminders after {} and {}, short break after {} idle, inactive after {} idle",
                soft_limit, hard_limit, short_break_idle, inactivity_idle
            ),
            Message::MonitorStopped => "Activity monitor stopped".to_string(),
            Message::MonitorShuttingDown => "Shutting down activity monitor...".to_string(),
            Message::MonitorReceivedSigterm => "Received SIGTERM, shutting down...".to_string(),
            Message::MonitorReceivedSigint => "Received SIGINT, shutting down...".to_string(),
            Message::MonitorReceivedCtrlC => "Received Ctrl+C, shutting down...".to_string(),
            Message::MonitorSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::MonitorPaused => "Monitoring paused".to_string(),
            Message::MonitorResumed => "Monitoring resumed".to_string(),
            Message::MonitorDriftMode => "Drift mode: time is tracked, notifications are muted".to_string(),
            Message::MonitorControlsHint => {
                "Type r + Enter to reset, m to switch work/drift, p to pause or resume, c to reload config".to_string()
            }
            Message::MonitorReset => "Totals reset".to_string(),
            Message::MonitorModeChanged(mode) => format!("Switched to {} mode, totals reset", mode),
            Message::MonitorConfigReloaded => "Configuration reloaded, thresholds applied".to_string(),
            Message::ControlsUnavailable(error) => format!("Keyboard controls unavailable: {}", error),
            Message::UnknownControl(input) => format!("Unknown command '{}' (use r, m, p or c)", input),
            Message::MonitorStatus { mode, session, worked, away } => {
                format!("[{}] session: {} | worked: {} | away: {}", mode, session, worked, away)
            }
            Message::ActivityListenerFailed(error) => format!("Failed to listen for input events: {}. Retrying in 1 second...", error),
            Message::ActivitySourceClosed => "Activity source closed; no further input will be detected".to_string(),

            // === OUTBOUND MESSAGES ===
            Message::OutboundNotConfigured => "Telegram is not configured, alerts stay local".to_string(),
            Message::OutboundFailed(error) => format!("Failed to send alert: {}", error),

            // === THRESHOLD PRESETS ===
            Message::PresetDebug => "Debug timings: reminders after 10s/40s, short break 5s, inactivity 15s".to_string(),
            Message::PresetLong => "Long timings: reminders after 40m/60m, short break 10m, inactivity 25m".to_string(),
            Message::SoftLimitOverride(minutes) => format!("First reminder after {} min", minutes),
        };
        write!(f, "{}", text)
    }
}
