//! Outbound notification abstraction
//!
//! The recovery flow only ever emails a short numeric code, so the port is a
//! single method. Implementations live in the infrastructure crate.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Delivery channel for recovery codes
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the recovery code to the given address
    async fn send_recovery_code(&self, to_email: &str, code: &str) -> DomainResult<()>;
}
