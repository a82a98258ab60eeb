//! Recovery code and token lifecycle

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng, RngCore};
use std::sync::Arc;
use tracing;

use pnr_shared::config::recovery::RecoveryConfig;
use pnr_shared::utils::email::{mask_email, normalize_email};

use crate::domain::entities::recovery::{code_key, token_key, verified_key};
use crate::errors::DomainResult;
use crate::services::cache::CacheStore;

/// Freshly opened recovery: the code goes out by email, the token goes
/// back to the caller's browser.
#[derive(Debug, Clone)]
pub struct IssuedRecovery {
    pub code: String,
    pub token: String,
}

/// Result of checking a submitted code against the stored one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCheck {
    /// Code matched; the recovery is now verified
    Verified,
    /// Code is live but the submitted digits differ
    WrongCode,
    /// The code aged out while the token is still live
    Expired,
    /// Token unknown, expired or not the one issued for this account
    InvalidToken,
}

/// Drives the recovery lifecycle in the cache store
///
/// State lives under three keys per account: the emailed code, the
/// browser token and the verified flag. Each carries its own TTL, so an
/// abandoned recovery disappears without cleanup.
pub struct RecoveryService<C: CacheStore> {
    store: Arc<C>,
    config: RecoveryConfig,
}

impl<C: CacheStore> RecoveryService<C> {
    pub fn new(store: Arc<C>, config: RecoveryConfig) -> Self {
        Self { store, config }
    }

    /// Open a recovery for the account.
    ///
    /// Generates a fresh code and token and stores both. Re-issuing
    /// replaces any previous code and token and revokes a verified flag
    /// left by an earlier verification, so only the newest pair works.
    pub async fn issue(&self, email: &str) -> DomainResult<IssuedRecovery> {
        let email = normalize_email(email);

        // Revoke the verified flag of a superseded token, if any.
        if let Some(previous_token) = self.store.get(&token_key(&email)).await? {
            self.store
                .delete(&verified_key(&email, &previous_token))
                .await?;
        }

        let code = generate_code(self.config.code_length);
        let token = generate_token(self.config.token_bytes);

        self.store
            .set_with_ttl(&code_key(&email), &code, self.config.code_ttl_seconds)
            .await?;
        self.store
            .set_with_ttl(&token_key(&email), &token, self.config.token_ttl_seconds)
            .await?;

        tracing::info!(
            email = %mask_email(&email),
            code_ttl_seconds = self.config.code_ttl_seconds,
            token_ttl_seconds = self.config.token_ttl_seconds,
            event = "recovery_issued",
            "Issued password recovery code and token"
        );

        Ok(IssuedRecovery { code, token })
    }

    /// Compare a submitted token against the stored one in constant time.
    ///
    /// `false` when no token is live for the account or the bytes differ.
    pub async fn verify_token(&self, email: &str, submitted_token: &str) -> DomainResult<bool> {
        let email = normalize_email(email);
        let Some(stored_token) = self.store.get(&token_key(&email)).await? else {
            return Ok(false);
        };
        Ok(constant_time_eq(
            stored_token.as_bytes(),
            submitted_token.as_bytes(),
        ))
    }

    /// Check a submitted code and, on a match, mark the recovery verified.
    ///
    /// The token is checked first; a stale or foreign token never learns
    /// whether the code was right. Comparisons run in constant time. The
    /// code entry stays live after a match, so resubmitting the same form
    /// verifies again instead of failing.
    pub async fn verify_code(
        &self,
        email: &str,
        token: &str,
        submitted_code: &str,
    ) -> DomainResult<CodeCheck> {
        let email = normalize_email(email);

        if !self.verify_token(&email, token).await? {
            tracing::warn!(
                email = %mask_email(&email),
                event = "recovery_token_mismatch",
                "Code verification attempted with a missing, stale or foreign token"
            );
            return Ok(CodeCheck::InvalidToken);
        }

        let Some(stored_code) = self.store.get(&code_key(&email)).await? else {
            return Ok(CodeCheck::Expired);
        };
        if !constant_time_eq(stored_code.as_bytes(), submitted_code.trim().as_bytes()) {
            tracing::warn!(
                email = %mask_email(&email),
                event = "recovery_code_mismatch",
                "Submitted recovery code did not match"
            );
            return Ok(CodeCheck::WrongCode);
        }

        self.store
            .set_with_ttl(
                &verified_key(&email, token),
                "1",
                self.config.verified_ttl_seconds,
            )
            .await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "recovery_code_verified",
            "Recovery code verified"
        );

        Ok(CodeCheck::Verified)
    }

    /// Whether this account/token pair has passed code verification.
    ///
    /// The token must still be live and match the stored one; the verified
    /// flag alone is not enough, since its TTL starts later and can outlast
    /// the token's.
    pub async fn is_verified(&self, email: &str, token: &str) -> DomainResult<bool> {
        let email = normalize_email(email);

        if !self.verify_token(&email, token).await? {
            return Ok(false);
        }

        self.store.exists(&verified_key(&email, token)).await
    }

    /// Close the recovery: drop code, token and verified flag.
    ///
    /// Runs after a successful password change, and also when the change
    /// could not be announced to the user, so a half-finished recovery
    /// cannot be replayed.
    pub async fn consume(&self, email: &str, token: &str) -> DomainResult<()> {
        let email = normalize_email(email);

        self.store.delete(&code_key(&email)).await?;
        self.store.delete(&token_key(&email)).await?;
        self.store.delete(&verified_key(&email, token)).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "recovery_consumed",
            "Recovery state cleared"
        );

        Ok(())
    }
}

/// Generate a numeric code, one CSPRNG draw per digit
fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from_digit(rng.gen_range(0..10u32), 10).unwrap_or('0'))
        .collect()
}

/// Generate a URL-safe random token from `bytes` bytes of OS entropy
fn generate_token(bytes: usize) -> String {
    let mut rng = OsRng;
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}
