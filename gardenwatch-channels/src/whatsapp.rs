//! CallMeBot WhatsApp channel
//!
//! Community gateway that forwards a GET request to a WhatsApp message.
//! The recipient pairs their phone number with the CallMeBot contact once
//! and receives a personal API key; after that a single
//! `whatsapp.php?phone=..&text=..&apikey=..` call delivers the text.
//!
//! Responses are plain text, so unlike Telegram there is no structured
//! error to mine: the status code decides, and the body's first line is
//! logged for the operator.

use std::time::Duration;

use gardenwatch_core::{AlertChannel, SendError};

use crate::{body_snippet, build_agent, check_endpoint, ConfigError};

/// Default gateway host.
const DEFAULT_API_URL: &str = "https://api.callmebot.com";

/// Credentials and tuning for one WhatsApp recipient.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Recipient phone number in international format (`+254...`)
    pub phone: String,
    /// Personal API key issued by the CallMeBot pairing flow
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Gateway host override (tests, proxies)
    pub api_url: String,
}

impl WhatsAppConfig {
    /// Create a config with the default gateway and a 10 s timeout.
    pub fn new(phone: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            api_url: DEFAULT_API_URL.into(),
        }
    }

    /// Set the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Override the gateway host.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

/// CallMeBot channel over a reusable blocking agent.
pub struct WhatsAppChannel {
    config: WhatsAppConfig,
    agent: ureq::Agent,
}

impl WhatsAppChannel {
    /// Build the channel, validating the endpoint and credentials.
    pub fn new(config: WhatsAppConfig) -> Result<Self, ConfigError> {
        check_endpoint(&config.api_url)?;
        if config.phone.is_empty() {
            return Err(ConfigError::MissingCredential("phone"));
        }
        if config.api_key.is_empty() {
            return Err(ConfigError::MissingCredential("api_key"));
        }
        let agent = build_agent(config.timeout);
        Ok(Self { config, agent })
    }

    fn endpoint(&self) -> String {
        format!("{}/whatsapp.php", self.config.api_url)
    }
}

impl AlertChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    fn send(&mut self, message: &str) -> Result<(), SendError> {
        let result = self
            .agent
            .get(&self.endpoint())
            .query("phone", &self.config.phone)
            .query("text", message)
            .query("apikey", &self.config.api_key)
            .call();

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                log::warn!(
                    "whatsapp gateway rejected message (status {status}): {}",
                    body_snippet(&body)
                );
                Err(SendError::Rejected { status })
            }
            Err(ureq::Error::Transport(transport)) => {
                log::warn!("whatsapp transport error: {transport}");
                Err(SendError::Transport)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = WhatsAppConfig::new("+254700000000", "key");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn endpoint_is_the_gateway_script() {
        let channel = WhatsAppChannel::new(
            WhatsAppConfig::new("+254700000000", "key").api_url("http://127.0.0.1:9"),
        )
        .unwrap();
        assert_eq!(channel.endpoint(), "http://127.0.0.1:9/whatsapp.php");
    }

    #[test]
    fn rejects_missing_credentials() {
        assert!(matches!(
            WhatsAppChannel::new(WhatsAppConfig::new("", "key")),
            Err(ConfigError::MissingCredential("phone"))
        ));
        assert!(matches!(
            WhatsAppChannel::new(WhatsAppConfig::new("+254700000000", "")),
            Err(ConfigError::MissingCredential("api_key"))
        ));
    }
}
