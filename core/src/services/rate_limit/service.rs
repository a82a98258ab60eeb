//! Sliding-window rate limiter backed by the cache store

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing;

use pnr_shared::config::rate_limit::{RateLimitConfig, RateLimitPolicy};

use crate::errors::DomainResult;
use crate::services::cache::CacheStore;

/// Identifier for login attempts from a single address
pub fn login_ip_identifier(ip: &str) -> String {
    format!("ip:{}", ip)
}

/// Identifier for login attempts against a single account
pub fn login_email_identifier(email: &str) -> String {
    format!("email:{}", email.trim().to_lowercase())
}

/// Identifier for registration attempts from a single address
pub fn registration_identifier(ip: &str) -> String {
    format!("register:{}", ip)
}

/// Identifier for password-reset requests from a single address
pub fn recovery_request_identifier(ip: &str) -> String {
    format!("recovery:{}", ip)
}

/// Identifier for reset-code guesses, scoped to address and account
pub fn code_verification_identifier(ip: &str, email: &str) -> String {
    format!("verify:{}:{}", ip, email.trim().to_lowercase())
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The attempt may proceed
    Allowed {
        /// Attempts left once this one is recorded
        remaining: u32,
    },
    /// The window is full
    Limited {
        /// Seconds until the oldest attempt ages out
        retry_after_seconds: u64,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Sliding-window rate limiter
///
/// Each identifier maps to a cache entry holding a JSON array of attempt
/// timestamps. [`check`](RateLimiter::check) prunes timestamps older than
/// the policy window and compares the survivors against the policy cap;
/// it never writes. [`record`](RateLimiter::record) appends the current
/// instant and rewrites the entry with a fixed TTL, so abandoned
/// identifiers clean themselves up.
pub struct RateLimiter<C: CacheStore> {
    store: Arc<C>,
    config: RateLimitConfig,
}

impl<C: CacheStore> RateLimiter<C> {
    pub fn new(store: Arc<C>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Whether limiting is active at all
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Check whether another attempt is allowed under the given policy.
    ///
    /// Read-only: a denied attempt does not consume window capacity, and
    /// callers that validate input before counting an attempt can check
    /// first and [`record`](RateLimiter::record) only when appropriate.
    pub async fn check(
        &self,
        identifier: &str,
        policy: &RateLimitPolicy,
    ) -> DomainResult<RateLimitDecision> {
        if !self.config.enabled {
            return Ok(RateLimitDecision::Allowed {
                remaining: policy.max_attempts.saturating_sub(1),
            });
        }

        let now = Utc::now();
        let attempts = self.load_attempts(identifier).await?;
        let window = Duration::seconds(policy.window_seconds());
        let live: Vec<&DateTime<Utc>> = attempts
            .iter()
            .filter(|t| now.signed_duration_since(**t) < window)
            .collect();

        if live.len() as u32 >= policy.max_attempts {
            // Oldest surviving attempt defines when capacity frees up.
            let oldest = live.iter().min().map(|t| **t).unwrap_or(now);
            let retry_after = (oldest + window - now).num_seconds().max(1) as u64;

            tracing::warn!(
                identifier = identifier,
                attempts = live.len(),
                max_attempts = policy.max_attempts,
                retry_after_seconds = retry_after,
                event = "rate_limit_exceeded",
                "Rate limit window is full"
            );

            return Ok(RateLimitDecision::Limited {
                retry_after_seconds: retry_after,
            });
        }

        Ok(RateLimitDecision::Allowed {
            remaining: policy.max_attempts - live.len() as u32 - 1,
        })
    }

    /// Record an attempt against the identifier.
    ///
    /// Prunes nothing by policy here; stale timestamps are dropped against
    /// the longest window so one entry can serve policies of different
    /// lengths. The entry TTL is fixed at the configured record lifetime,
    /// which covers every policy window.
    pub async fn record(&self, identifier: &str) -> DomainResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let now = Utc::now();
        let retention = Duration::seconds(self.config.record_ttl_seconds as i64);
        let mut attempts = self.load_attempts(identifier).await?;
        attempts.retain(|t| now.signed_duration_since(*t) < retention);
        attempts.push(now);

        let payload = serde_json::to_string(&attempts).map_err(|e| {
            crate::errors::DomainError::Internal {
                message: format!("Failed to encode rate limit entry: {}", e),
            }
        })?;

        self.store
            .set_with_ttl(
                &storage_key(identifier),
                &payload,
                self.config.record_ttl_seconds,
            )
            .await?;

        tracing::debug!(
            identifier = identifier,
            attempts = attempts.len(),
            event = "rate_limit_recorded",
            "Recorded attempt"
        );

        Ok(())
    }

    /// Drop all recorded attempts for an identifier
    pub async fn clear(&self, identifier: &str) -> DomainResult<()> {
        self.store.delete(&storage_key(identifier)).await
    }

    async fn load_attempts(&self, identifier: &str) -> DomainResult<Vec<DateTime<Utc>>> {
        let raw = self.store.get(&storage_key(identifier)).await?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(attempts) => Ok(attempts),
            Err(e) => {
                // A corrupt entry must not brick the identifier. Start over.
                tracing::warn!(
                    identifier = identifier,
                    error = %e,
                    event = "rate_limit_corrupt_entry",
                    "Discarding unreadable rate limit entry"
                );
                Ok(Vec::new())
            }
        }
    }
}

fn storage_key(identifier: &str) -> String {
    format!("rate_limit:{}", identifier)
}
