//! Outbound alert delivery through the Telegram Bot API.
//!
//! Sending is fire-and-forget from the engine's point of view: the monitor
//! spawns [`Telegram::send`] on its own task and only logs the outcome.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE_URL: &str = "https://api.telegram.org";

/// Bot credentials and the on/off switch.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TelegramConfig {
    pub enabled: bool,
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramConfig {
    /// Delivery happens only when enabled and both credentials are filled in.
    pub fn is_ready(&self) -> bool {
        self.enabled && !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram delivery is disabled or not configured")]
    NotConfigured,
    #[error("telegram API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Telegram {
    client: Client,
    config: TelegramConfig,
    base_url: String,
}

impl Telegram {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Points the sender at a different API host (self-hosted Bot API server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.config.bot_token)
    }

    /// Form fields of a `sendMessage` call.
    pub fn form_params(&self, text: &str, silent: bool) -> Vec<(&'static str, String)> {
        vec![
            ("chat_id", self.config.chat_id.clone()),
            ("text", text.to_string()),
            ("disable_notification", silent.to_string()),
        ]
    }

    pub async fn send(&self, text: &str, silent: bool) -> Result<(), TelegramError> {
        if !self.config.is_ready() {
            return Err(TelegramError::NotConfigured);
        }

        let res = self
            .client
            .post(self.send_message_url())
            .form(&self.form_params(text, silent))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(TelegramError::Api { status, body });
        }

        tracing::debug!(silent, "telegram message delivered");
        Ok(())
    }
}
