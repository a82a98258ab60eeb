//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis settings for the expiring key-value store
///
/// Rate-limit windows and password-recovery state live behind this
/// connection. Every entry carries its own TTL, so there is no
/// default-expiry knob here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection attempts before startup gives up
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,

    /// Base backoff between connection attempts, in milliseconds
    #[serde(default = "default_connect_backoff_ms")]
    pub connect_backoff_ms: u64,

    /// Prefix applied verbatim to every key, for deployments sharing one
    /// Redis (include the trailing separator, e.g. `"pnr:"`)
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connect_attempts: default_connect_attempts(),
            connect_backoff_ms: default_connect_backoff_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Read `REDIS_URL` and `REDIS_KEY_PREFIX` from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("REDIS_URL") {
            config.url = url;
        }
        if let Ok(prefix) = std::env::var("REDIS_KEY_PREFIX") {
            if !prefix.is_empty() {
                config.key_prefix = Some(prefix);
            }
        }
        config
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

fn default_connect_attempts() -> u32 {
    3
}

fn default_connect_backoff_ms() -> u64 {
    100
}
