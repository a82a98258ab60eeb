//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Login sessions, password hashing, DNS probe toggle
//! - `cache` - Redis configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mailer` - Transactional mail provider
//! - `rate_limit` - Sliding-window policies for login and recovery
//! - `recovery` - Recovery code and token TTLs

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod mailer;
pub mod rate_limit;
pub mod recovery;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mailer::MailerConfig;
pub use rate_limit::{RateLimitConfig, RateLimitPolicy};
pub use recovery::RecoveryConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Password recovery configuration
    #[serde(default)]
    pub recovery: RecoveryConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Mail provider configuration
    pub mailer: MailerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            recovery: RecoveryConfig::default(),
            rate_limit: RateLimitConfig::default(),
            mailer: MailerConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/patasnarua_dev")
                .with_logging(true),
            cache: CacheConfig::default(),
            auth: AuthConfig::development(),
            recovery: RecoveryConfig::default(),
            rate_limit: RateLimitConfig::development(),
            mailer: MailerConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::from_env().with_max_connections(50),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::production(),
            recovery: RecoveryConfig::default(),
            rate_limit: RateLimitConfig::production(),
            mailer: MailerConfig::from_env(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}
