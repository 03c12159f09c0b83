//! HTTP Messaging Channels for GardenWatch Alerts
//!
//! ## Overview
//!
//! Concrete [`AlertChannel`](gardenwatch_core::AlertChannel) implementations
//! for the messaging providers a garden node actually reaches from a home
//! network. Both speak plain HTTPS GET with query-string parameters: no
//! SDKs, no webhooks, no inbound connectivity.
//!
//! ## Provider Notes
//!
//! ### Telegram Bot API
//!
//! `GET https://api.telegram.org/bot<token>/sendMessage?chat_id=..&text=..`
//!
//! - Free, reliable, and instant to a private chat or group
//! - Errors come back as JSON with a useful `description` field, which is
//!   logged before the failure is narrowed to the core's `SendError`
//!
//! ### CallMeBot WhatsApp
//!
//! `GET https://api.callmebot.com/whatsapp.php?phone=..&text=..&apikey=..`
//!
//! - Community gateway: the recipient pairs their number with the bot once
//!   and receives a personal API key
//! - Plain-text responses; status code is the only reliable signal
//!
//! ## Design Notes
//!
//! - **Blocking sends**: the monitor loop is a single cooperative thread,
//!   so channels block by design. The per-channel `ureq` agent carries a
//!   request timeout that bounds how long one send can hold up the next
//!   sensor read; a timeout surfaces as a transport failure.
//! - **Query-pair encoding**: message text goes through `ureq`'s query
//!   API, which percent-escapes values per standard URL query rules, so
//!   spaces, `|` separators, and degree signs all survive the trip.
//! - **Typed outcomes**: a send returns `Ok` or a `SendError` with the
//!   provider's status code when one was received. Provider error bodies
//!   never cross into the core; they are logged here, where they are still
//!   strings.
//!
//! ## Example Usage
//!
//! ```no_run
//! use gardenwatch_channels::{TelegramChannel, TelegramConfig};
//! use gardenwatch_core::AlertChannel;
//!
//! # fn main() -> Result<(), gardenwatch_channels::ConfigError> {
//! let mut telegram = TelegramChannel::new(
//!     TelegramConfig::new("123456:bot-token", "987654321").timeout_secs(10),
//! )?;
//!
//! if let Err(e) = telegram.send("Soil dry: 21% (threshold 30%)") {
//!     log::warn!("alert not delivered: {e}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod telegram;
pub mod whatsapp;

pub use telegram::{TelegramChannel, TelegramConfig};
pub use whatsapp::{WhatsAppChannel, WhatsAppConfig};

use std::time::Duration;

use thiserror::Error;

/// Channel construction errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Endpoint URL is not plain or TLS HTTP
    #[error("endpoint must start with http:// or https://: {0}")]
    InvalidEndpoint(String),

    /// A required credential field is empty
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Build the shared agent shape: bounded timeout, identifying user agent.
pub(crate) fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(&format!("GardenWatch/{}", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Validate an endpoint override before an agent is built around it.
pub(crate) fn check_endpoint(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpoint(url.into()))
    }
}

/// First line of a provider body, capped for the log.
pub(crate) fn body_snippet(body: &str) -> &str {
    let line = body.lines().next().unwrap_or("");
    match line.char_indices().nth(200) {
        Some((cut, _)) => &line[..cut],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_validation() {
        assert!(check_endpoint("https://api.telegram.org").is_ok());
        assert!(check_endpoint("http://127.0.0.1:8080").is_ok());
        assert!(check_endpoint("api.telegram.org").is_err());
        assert!(check_endpoint("ftp://example.com").is_err());
    }

    #[test]
    fn body_snippet_takes_first_line_capped() {
        assert_eq!(body_snippet("error text\nsecond line"), "error text");
        let long = "x".repeat(400);
        assert_eq!(body_snippet(&long).len(), 200);
    }
}
