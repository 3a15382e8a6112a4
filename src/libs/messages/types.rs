/// Every user-facing text of the application.
///
/// Text lives in [`display`](super::display); this enum only names the
/// messages and carries their parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNothingToDelete,
    ConfigReadFailed(String),
    ConfigModuleThresholds,
    ConfigModuleAlertWindow,
    ConfigModuleTelegram,
    ConfigHeader(String), // file path
    HardLimitBelowSoftLimit { soft: u64, hard: u64 },
    ShortBreakNotBeforeInactivity { short_break: u64, inactivity: u64 },
    InvalidAlertHour(u32),

    // === PROMPTS ===
    PromptSelectModules,
    PromptSoftLimit,
    PromptHardLimit,
    PromptShortBreakIdle,
    PromptInactivityIdle,
    PromptAlertStartHour,
    PromptAlertEndHour,
    PromptTelegramEnabled,
    PromptTelegramBotToken,
    PromptTelegramChatId,

    // === MONITOR MESSAGES ===
    MonitorStarted {
        soft_limit: String,
        hard_limit: String,
        short_break_idle: String,
        inactivity_idle: String,
    },
    MonitorStopped,
    MonitorShuttingDown,
    MonitorReceivedSigterm,
    MonitorReceivedSigint,
    MonitorReceivedCtrlC,
    MonitorSignalHandlingNotSupported,
    MonitorPaused,
    MonitorResumed,
    MonitorDriftMode,
    MonitorControlsHint,
    MonitorReset,
    MonitorModeChanged(String),
    MonitorConfigReloaded,
    UnknownControl(String),
    ControlsUnavailable(String),
    MonitorStatus {
        mode: String,
        session: String,
        worked: String,
        away: String,
    },
    ActivityListenerFailed(String),
    ActivitySourceClosed,

    // === OUTBOUND MESSAGES ===
    OutboundNotConfigured,
    OutboundFailed(String),

    // === THRESHOLD PRESETS ===
    PresetDebug,
    PresetLong,
    SoftLimitOverride(u64),
}
