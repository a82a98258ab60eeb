//! Transactional mail configuration

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP mail provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailerConfig {
    /// Provider send endpoint
    pub api_url: String,

    /// Bearer token for the provider API
    pub api_key: String,

    /// From address for transactional mail
    pub from_address: String,

    /// Display name for the from address
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Delivery attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.mail.example/v3/send"),
            api_key: String::new(),
            from_address: String::from("nao-responda@patasnarua.org.br"),
            from_name: default_from_name(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl MailerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MAILER_API_URL")
                .unwrap_or_else(|_| Self::default().api_url),
            api_key: std::env::var("MAILER_API_KEY").unwrap_or_default(),
            from_address: std::env::var("MAILER_FROM_ADDRESS")
                .unwrap_or_else(|_| Self::default().from_address),
            from_name: std::env::var("MAILER_FROM_NAME")
                .unwrap_or_else(|_| default_from_name()),
            timeout_seconds: std::env::var("MAILER_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            max_retries: std::env::var("MAILER_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
        }
    }

    /// Check whether credentials are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_url.is_empty()
    }
}

fn default_from_name() -> String {
    String::from("Patas na Rua")
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}
