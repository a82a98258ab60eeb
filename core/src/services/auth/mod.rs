//! Authentication flow module
//!
//! This module provides the account lifecycle flows:
//! - Login with per-address and per-account rate limiting
//! - Individual and organization registration
//! - Three-step password recovery (request, code, new password)
//! - Optional email deliverability probing via DNS

mod config;
mod dns;
mod notifier;
mod password;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthFlowConfig;
pub use dns::{DnsResolver, NoOpDnsResolver};
pub use notifier::Notifier;
pub use password::{hash_password, verify_password};
pub use service::AuthFlowService;
pub use types::{
    CodeSubmission, LoginRequest, NewPasswordSubmission, PasswordResetRequest,
    RegisterIndividualRequest, RegisterOrganizationRequest,
};
