//! Configuration for the authentication flow service

use pnr_shared::config::auth::AuthConfig;
use pnr_shared::config::rate_limit::RateLimitConfig;
use pnr_shared::config::recovery::RecoveryConfig;
use pnr_shared::config::AppConfig;

/// Configuration for the authentication flow service
///
/// Bundles the three config sections the flow touches so one value can be
/// handed to the constructor.
#[derive(Debug, Clone, Default)]
pub struct AuthFlowConfig {
    /// Session lifetime, bcrypt cost and the DNS probe switch
    pub auth: AuthConfig,
    /// Admission policies per gate
    pub rate_limit: RateLimitConfig,
    /// Recovery code/token lengths and TTLs
    pub recovery: RecoveryConfig,
}

impl AuthFlowConfig {
    /// Pick the relevant sections out of the application config
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            auth: config.auth.clone(),
            rate_limit: config.rate_limit.clone(),
            recovery: config.recovery.clone(),
        }
    }
}
