//! Cache module for Redis-based caching
//!
//! Provides the Redis-backed cache store the core services use for
//! rate-limit windows and password recovery state.

pub mod redis_client;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use pnr_shared::config::cache::CacheConfig;
