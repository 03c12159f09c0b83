//! Telegram Bot API channel
//!
//! Delivers alert text to a chat via the bot `sendMessage` method. One
//! GET per alert, credentials in the path and query, which is all the
//! Bot API needs without a session or webhook.
//!
//! Rejections come back as JSON (`{"ok":false,"error_code":..,
//! "description":".."}`); the description is logged at this layer before
//! the failure is narrowed to [`SendError::Rejected`].

use std::time::Duration;

use gardenwatch_core::{AlertChannel, SendError};

use crate::{body_snippet, build_agent, check_endpoint, ConfigError};

/// Default Bot API host.
const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Credentials and tuning for one Telegram bot channel.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from @BotFather (`123456:ABC-...`)
    pub bot_token: String,
    /// Target chat or group id
    pub chat_id: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// API host override (tests, proxies)
    pub api_url: String,
}

impl TelegramConfig {
    /// Create a config with the default host and a 10 s timeout.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            timeout: Duration::from_secs(10),
            api_url: DEFAULT_API_URL.into(),
        }
    }

    /// Set the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Override the API host.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

/// Telegram channel over a reusable blocking agent.
pub struct TelegramChannel {
    config: TelegramConfig,
    agent: ureq::Agent,
}

impl TelegramChannel {
    /// Build the channel, validating the endpoint and credentials.
    pub fn new(config: TelegramConfig) -> Result<Self, ConfigError> {
        check_endpoint(&config.api_url)?;
        if config.bot_token.is_empty() {
            return Err(ConfigError::MissingCredential("bot_token"));
        }
        if config.chat_id.is_empty() {
            return Err(ConfigError::MissingCredential("chat_id"));
        }
        let agent = build_agent(config.timeout);
        Ok(Self { config, agent })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url, self.config.bot_token
        )
    }
}

impl AlertChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn send(&mut self, message: &str) -> Result<(), SendError> {
        let result = self
            .agent
            .get(&self.endpoint())
            .query("chat_id", &self.config.chat_id)
            .query("text", message)
            .call();

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let detail = serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| v.get("description").and_then(|d| d.as_str()).map(String::from));
                match detail {
                    Some(description) => {
                        log::warn!("telegram rejected message (status {status}): {description}")
                    }
                    None => log::warn!(
                        "telegram rejected message (status {status}): {}",
                        body_snippet(&body)
                    ),
                }
                Err(SendError::Rejected { status })
            }
            Err(ureq::Error::Transport(transport)) => {
                log::warn!("telegram transport error: {transport}");
                Err(SendError::Transport)
            }
        }
    }
}
