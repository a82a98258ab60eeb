//! MySQL connection pool
//!
//! Builds the SQLx pool from [`DatabaseConfig`] and exposes the few
//! lifecycle operations the portal needs: a health probe, pool statistics
//! for operators, and shutdown.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool, Row,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use pnr_shared::config::database::DatabaseConfig;

use crate::InfrastructureError;

/// Shared MySQL pool handle
///
/// Cloning is cheap; all clones point at the same pool.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Open a pool against the configured MySQL server
    ///
    /// Statement logging follows `config.enable_logging`; statements slower
    /// than `config.slow_query_threshold` milliseconds are warned about.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            max_connections = config.max_connections,
            "Opening MySQL connection pool"
        );

        let mut options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let statement_level = if config.enable_logging {
            LevelFilter::Debug
        } else {
            LevelFilter::Off
        };
        options = options.log_statements(statement_level).log_slow_statements(
            LevelFilter::Warn,
            Duration::from_millis(config.slow_query_threshold),
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            // Validate connections on checkout
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to open MySQL pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        tracing::info!("MySQL connection pool ready");

        Ok(Self { pool })
    }

    /// The underlying SQLx pool, for wiring repositories and transactions
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip probe: `SELECT 1` must come back as 1
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let row = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                InfrastructureError::Database(e)
            })?;

        let value: i32 = row.try_get(0).unwrap_or(0);
        if value != 1 {
            tracing::warn!(value, "Database health check returned unexpected value");
        }
        Ok(value == 1)
    }

    /// Snapshot of pool occupancy
    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.pool.options().get_max_connections(),
        }
    }

    /// Drain and close every connection; call on shutdown
    pub async fn close(&self) {
        tracing::info!("Closing MySQL connection pool");
        self.pool.close().await;
    }
}

/// Point-in-time pool occupancy
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    /// Connections currently open
    pub size: u32,
    /// Of those, connections sitting idle
    pub idle: usize,
    /// Configured ceiling
    pub max: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pool {}/{} ({} idle)", self.size, self.max, self.idle)
    }
}
