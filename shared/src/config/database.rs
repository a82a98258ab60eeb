//! Database configuration module

use serde::{Deserialize, Serialize};

/// MySQL connection-pool settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Connections the pool may hold
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait when acquiring a connection before giving up
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Seconds an idle connection may sit in the pool
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,

    /// Seconds before a pooled connection is closed and replaced
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime: u64,

    /// Log executed SQL statements (leave off outside development)
    #[serde(default)]
    pub enable_logging: bool,

    /// Statements slower than this many milliseconds are logged as warnings
    #[serde(default = "default_slow_query_threshold")]
    pub slow_query_threshold: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/patasnarua"),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
            max_lifetime: default_max_lifetime(),
            enable_logging: false,
            slow_query_threshold: default_slow_query_threshold(),
        }
    }
}

impl DatabaseConfig {
    /// Read connection settings from the environment. `DATABASE_URL` is the
    /// one that matters; pool knobs fall back to defaults when unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.url = url;
        }
        if let Some(max) = env_u32("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max;
        }
        if let Some(secs) = env_u64("DATABASE_CONNECT_TIMEOUT") {
            config.connect_timeout = secs;
        }
        config
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enable SQL statement logging
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}

fn default_slow_query_threshold() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = DatabaseConfig::default();
        assert!(config.url.starts_with("mysql://"));
        assert!(config.max_connections > 0);
        assert!(config.idle_timeout < config.max_lifetime);
    }

    #[test]
    fn test_builders() {
        let config = DatabaseConfig::new("mysql://db.internal:3306/portal")
            .with_max_connections(32)
            .with_logging(true);
        assert_eq!(config.url, "mysql://db.internal:3306/portal");
        assert_eq!(config.max_connections, 32);
        assert!(config.enable_logging);
    }
}
