//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Login and credential-handling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds when "remember me" is checked.
    /// Without it the session lasts until the browser closes.
    #[serde(default = "default_remember_ttl")]
    pub session_ttl_remember_seconds: u64,

    /// bcrypt work factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Probe the email domain for an MX (or A) record during registration
    #[serde(default)]
    pub dns_probe_enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_remember_seconds: default_remember_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
            dns_probe_enabled: false,
        }
    }
}

impl AuthConfig {
    /// Development configuration: no DNS probe, fast hashing for local runs
    pub fn development() -> Self {
        Self {
            bcrypt_cost: 4,
            ..Default::default()
        }
    }

    /// Production configuration
    pub fn production() -> Self {
        Self {
            dns_probe_enabled: true,
            ..Default::default()
        }
    }

    /// Override the DNS probe toggle
    pub fn with_dns_probe(mut self, enabled: bool) -> Self {
        self.dns_probe_enabled = enabled;
        self
    }
}

fn default_remember_ttl() -> u64 {
    2_592_000 // 30 days
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_remember_seconds, 2_592_000);
        assert_eq!(config.bcrypt_cost, 12);
        assert!(!config.dns_probe_enabled);
    }

    #[test]
    fn test_production_enables_dns_probe() {
        assert!(AuthConfig::production().dns_probe_enabled);
        assert!(!AuthConfig::development().dns_probe_enabled);
    }
}
