//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Patas na Rua
//! backend. It provides concrete implementations for the collaborators the
//! core services depend on: persistence, caching, outbound mail and DNS.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis-backed [`CacheStore`](pnr_core::services::cache::CacheStore)
//!   for rate-limit windows and recovery state
//! - **Email**: HTTP mail provider client implementing the core `Notifier`
//! - **DNS**: mail-exchanger probe for registration email checks
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)
//! - `dns-probe`: Enable the DNS deliverability probe (default)

// Re-export core types for convenience
pub use pnr_core::errors::*;

/// Cache module - Redis client and cache store implementation
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Database module - MySQL repositories using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// DNS module - mail-exchanger lookups for the deliverability probe
#[cfg(feature = "dns-probe")]
pub mod dns;

/// Email module - HTTP mail provider client
pub mod email;

use pnr_shared::config::AppConfig;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail provider rejected or failed a delivery
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// DNS lookup error
    #[error("DNS error: {0}")]
    Dns(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    /// Collapse to a persistence error. The detail stays server-side;
    /// user-facing text comes from the `DomainError` display.
    fn from(error: InfrastructureError) -> Self {
        DomainError::persistence(error.to_string())
    }
}

/// Wired infrastructure collaborators for the core services
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
pub struct InfrastructureServices {
    /// MySQL connection pool shared by the repositories
    pub database: database::DatabasePool,
    /// Redis-backed cache store
    pub cache: cache::RedisClient,
    /// HTTP mail provider client
    pub mailer: email::HttpMailer,
    /// DNS probe, present when enabled in the auth config
    #[cfg(feature = "dns-probe")]
    pub dns: Option<dns::HickoryDnsResolver>,
}

/// Initialize infrastructure services from a loaded configuration
///
/// Sets up the database pool, the Redis connection and the mail client.
/// The DNS probe is only built when the auth config enables it.
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let database = database::DatabasePool::connect(&config.database).await?;
    let cache = cache::RedisClient::new(config.cache.clone()).await?;
    let mailer = email::HttpMailer::new(config.mailer.clone())?;

    #[cfg(feature = "dns-probe")]
    let dns = if config.auth.dns_probe_enabled {
        Some(dns::HickoryDnsResolver::from_system()?)
    } else {
        None
    };

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        database,
        cache,
        mailer,
        #[cfg(feature = "dns-probe")]
        dns,
    })
}

/// Load configuration from the environment and initialize
///
/// Reads a `.env` file when present, then builds the per-environment
/// [`AppConfig`] and wires the services from it.
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
pub async fn initialize_from_env() -> Result<InfrastructureServices, InfrastructureError> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    initialize(&config).await
}
