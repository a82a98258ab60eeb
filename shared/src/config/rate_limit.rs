//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// A single sliding-window policy
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RateLimitPolicy {
    /// Attempts allowed inside the window
    pub max_attempts: u32,

    /// Window length in minutes
    pub window_minutes: i64,
}

impl RateLimitPolicy {
    pub const fn new(max_attempts: u32, window_minutes: i64) -> Self {
        Self {
            max_attempts,
            window_minutes,
        }
    }

    /// Window length in seconds
    pub fn window_seconds(&self) -> i64 {
        self.window_minutes * 60
    }
}

/// Rate limiting configuration
///
/// Attempt timestamps are always recorded with a fixed TTL that covers the
/// longest window in use, so one recorded attempt can serve every policy
/// that watches the same identifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Login attempts per client IP
    pub login_per_ip: RateLimitPolicy,

    /// Login attempts per account email
    pub login_per_email: RateLimitPolicy,

    /// Registration attempts per client IP
    pub registration: RateLimitPolicy,

    /// Password recovery requests per client IP
    pub recovery_request: RateLimitPolicy,

    /// Recovery code submissions per IP and email pair
    pub code_verification: RateLimitPolicy,

    /// TTL applied to recorded attempt lists, in seconds
    #[serde(default = "default_record_ttl")]
    pub record_ttl_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            login_per_ip: RateLimitPolicy::new(5, 15),
            login_per_email: RateLimitPolicy::new(5, 15),
            registration: RateLimitPolicy::new(3, 30),
            recovery_request: RateLimitPolicy::new(3, 30),
            code_verification: RateLimitPolicy::new(5, 15),
            record_ttl_seconds: default_record_ttl(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            login_per_ip: RateLimitPolicy::new(100, 15),
            login_per_email: RateLimitPolicy::new(50, 15),
            registration: RateLimitPolicy::new(30, 30),
            recovery_request: RateLimitPolicy::new(30, 30),
            code_verification: RateLimitPolicy::new(50, 15),
            record_ttl_seconds: default_record_ttl(),
        }
    }

    /// Create a production configuration (strict limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}

fn default_record_ttl() -> u64 {
    1800 // 30 minutes, the longest window in use
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.login_per_ip.max_attempts, 5);
        assert_eq!(config.login_per_ip.window_minutes, 15);
        assert_eq!(config.registration.max_attempts, 3);
        assert_eq!(config.registration.window_minutes, 30);
        assert_eq!(config.recovery_request.max_attempts, 3);
        assert_eq!(config.recovery_request.window_minutes, 30);
        assert_eq!(config.record_ttl_seconds, 1800);
    }

    #[test]
    fn test_window_seconds() {
        assert_eq!(RateLimitPolicy::new(5, 15).window_seconds(), 900);
        assert_eq!(RateLimitPolicy::new(3, 30).window_seconds(), 1800);
    }

    #[test]
    fn test_record_ttl_covers_every_window() {
        let config = RateLimitConfig::default();
        for policy in [
            config.login_per_ip,
            config.login_per_email,
            config.registration,
            config.recovery_request,
            config.code_verification,
        ] {
            assert!(policy.window_seconds() as u64 <= config.record_ttl_seconds);
        }
    }
}
