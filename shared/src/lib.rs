//! Shared utilities and common types for the Patas na Rua server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Validation utilities (CPF/CNPJ, phone, email, birth date, password)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, CacheConfig, RateLimitConfig, RateLimitPolicy,
    AuthConfig, RecoveryConfig, MailerConfig, LoggingConfig,
};
pub use errors::{ErrorResponse, IntoErrorResponse, error_codes};
pub use utils::{birth_date, document, email, password, phone};
