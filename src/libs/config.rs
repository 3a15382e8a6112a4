//! Configuration management for workcheck.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Every section is optional; a missing section falls back
//! to its defaults, so a fresh install works without any setup.
//!
//! ## Configuration Structure
//!
//! - **Thresholds**: reminder and idle durations, in whole minutes
//! - **Alert window**: clock hours during which inactivity alerts fire
//! - **Telegram**: bot credentials for outbound alerts
//!
//! Telegram credentials can also come from the environment (or a `.env`
//! file): `WORKCHECK_TELEGRAM_TOKEN` and `WORKCHECK_TELEGRAM_CHAT_ID` take
//! precedence over the file and turn delivery on.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use workcheck::libs::config::Config;
//!
//! let config = Config::read()?;
//! let thresholds = config.thresholds();
//! println!("First reminder after {:?}", thresholds.soft_limit);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::alert_window::WorkHours;
use crate::libs::engine::Thresholds;
use crate::libs::messages::Message;
use crate::libs::telegram::TelegramConfig;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use chrono::Duration;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_TELEGRAM_TOKEN: &str = "WORKCHECK_TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "WORKCHECK_TELEGRAM_CHAT_ID";

/// A configurable section shown in the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Reminder and idle thresholds, in minutes.
///
/// ## Default Values
///
/// - **25 minutes** of work before the first reminder
/// - **40 minutes** of work before the second reminder (also sent to Telegram)
/// - **5 minutes** without input count as a short break
/// - **15 minutes** without input count as inactivity
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdsConfig {
    /// Minutes of continuous work before the first reminder.
    pub soft_limit: u64,
    /// Minutes of continuous work before the second reminder.
    ///
    /// Expected to be at least `soft_limit`; a smaller value is accepted and
    /// simply makes both reminders fire at the same evaluation.
    pub hard_limit: u64,
    /// Minutes without input after which the user is on a short break.
    pub short_break_idle: u64,
    /// Minutes without input after which the user is inactive.
    pub inactivity_idle: u64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        ThresholdsConfig {
            soft_limit: 25,
            hard_limit: 40,
            short_break_idle: 5,
            inactivity_idle: 15,
        }
    }
}

impl From<ThresholdsConfig> for Thresholds {
    fn from(config: ThresholdsConfig) -> Self {
        Thresholds {
            soft_limit: minutes(config.soft_limit),
            hard_limit: minutes(config.hard_limit),
            short_break_idle: minutes(config.short_break_idle),
            inactivity_idle: minutes(config.inactivity_idle),
        }
    }
}

impl ThresholdsConfig {
    /// Combinations that are accepted but probably not what the user meant.
    pub fn warnings(&self) -> Vec<Message> {
        let mut warnings = Vec::new();
        if self.hard_limit < self.soft_limit {
            warnings.push(Message::HardLimitBelowSoftLimit {
                soft: self.soft_limit,
                hard: self.hard_limit,
            });
        }
        if self.short_break_idle >= self.inactivity_idle {
            warnings.push(Message::ShortBreakNotBeforeInactivity {
                short_break: self.short_break_idle,
                inactivity: self.inactivity_idle,
            });
        }
        warnings
    }
}

// Largest minute count a chrono::Duration can hold.
const MAX_MINUTES: u64 = (i64::MAX / 60_000) as u64;

fn minutes(value: u64) -> Duration {
    Duration::minutes(value.min(MAX_MINUTES) as i64)
}

/// Root configuration container.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_window: Option<WorkHours>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads configuration from the filesystem.
    ///
    /// - **Missing file**: returns the default configuration (not an error)
    /// - **Corrupted file**: returns the parse error
    pub fn read() -> Result<Config> {
        let config_file_path = Self::path()?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file = File::create(Self::path()?)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds.unwrap_or_default().into()
    }

    pub fn alert_window(&self) -> WorkHours {
        self.alert_window.unwrap_or_default()
    }

    /// Telegram settings with environment overrides applied.
    pub fn telegram(&self) -> TelegramConfig {
        let mut telegram = self.telegram.clone().unwrap_or_default();

        let token = std::env::var(ENV_TELEGRAM_TOKEN).ok().filter(|v| !v.trim().is_empty());
        let chat_id = std::env::var(ENV_TELEGRAM_CHAT_ID).ok().filter(|v| !v.trim().is_empty());
        if token.is_some() || chat_id.is_some() {
            telegram.enabled = true;
        }
        if let Some(token) = token {
            telegram.bot_token = token;
        }
        if let Some(chat_id) = chat_id {
            telegram.chat_id = chat_id;
        }

        telegram
    }

    /// Runs the interactive configuration wizard, starting from the stored values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "thresholds".to_string(),
                name: Message::ConfigModuleThresholds.to_string(),
            },
            ConfigModule {
                key: "alert_window".to_string(),
                name: Message::ConfigModuleAlertWindow.to_string(),
            },
            ConfigModule {
                key: "telegram".to_string(),
                name: Message::ConfigModuleTelegram.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "thresholds" => {
                    let default = config.thresholds.unwrap_or_default();
                    msg_print!(Message::ConfigModuleThresholds);
                    let thresholds = ThresholdsConfig {
                        soft_limit: prompt_u64(Message::PromptSoftLimit, default.soft_limit)?,
                        hard_limit: prompt_u64(Message::PromptHardLimit, default.hard_limit)?,
                        short_break_idle: prompt_u64(Message::PromptShortBreakIdle, default.short_break_idle)?,
                        inactivity_idle: prompt_u64(Message::PromptInactivityIdle, default.inactivity_idle)?,
                    };
                    for warning in thresholds.warnings() {
                        msg_warning!(warning);
                    }
                    config.thresholds = Some(thresholds);
                }
                "alert_window" => {
                    let default = config.alert_window.unwrap_or_default();
                    msg_print!(Message::ConfigModuleAlertWindow);
                    config.alert_window = Some(WorkHours {
                        start_hour: prompt_hour(Message::PromptAlertStartHour, default.start_hour)?,
                        end_hour: prompt_hour(Message::PromptAlertEndHour, default.end_hour)?,
                    });
                }
                "telegram" => {
                    let default = config.telegram.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleTelegram);
                    config.telegram = Some(TelegramConfig {
                        enabled: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTelegramEnabled.to_string())
                            .default(default.enabled)
                            .interact()?,
                        bot_token: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTelegramBotToken.to_string())
                            .default(default.bot_token)
                            .allow_empty(true)
                            .interact_text()?,
                        chat_id: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTelegramChatId.to_string())
                            .default(default.chat_id)
                            .allow_empty(true)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn prompt_u64(prompt: Message, default: u64) -> Result<u64> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default)
        .interact_text()?)
}

fn prompt_hour(prompt: Message, default: u32) -> Result<u32> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default)
        .validate_with(|hour: &u32| -> std::result::Result<(), String> {
            if *hour <= 24 {
                Ok(())
            } else {
                Err(Message::InvalidAlertHour(*hour).to_string())
            }
        })
        .interact_text()?)
}
