//! Password recovery configuration

use serde::{Deserialize, Serialize};

/// TTLs and sizes for recovery codes and tokens
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RecoveryConfig {
    /// Lifetime of the emailed 6-digit code, in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Lifetime of the browser-held recovery token, in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,

    /// Lifetime of the verified flag set after a correct code, in seconds
    #[serde(default = "default_token_ttl")]
    pub verified_ttl_seconds: u64,

    /// Digits in the emailed code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Random bytes behind the recovery token
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            token_ttl_seconds: default_token_ttl(),
            verified_ttl_seconds: default_token_ttl(),
            code_length: default_code_length(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_code_ttl() -> u64 {
    900 // 15 minutes
}

fn default_token_ttl() -> u64 {
    1800 // 30 minutes
}

fn default_code_length() -> usize {
    6
}

fn default_token_bytes() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecoveryConfig::default();
        assert_eq!(config.code_ttl_seconds, 900);
        assert_eq!(config.token_ttl_seconds, 1800);
        assert_eq!(config.verified_ttl_seconds, 1800);
        assert_eq!(config.code_length, 6);
        assert_eq!(config.token_bytes, 32);
    }

    #[test]
    fn test_token_outlives_code() {
        let config = RecoveryConfig::default();
        assert!(config.token_ttl_seconds >= config.code_ttl_seconds);
    }
}
