//! Profile repository trait for profile lookups and duplicate checks.
//!
//! Profiles are written through [`AccountRepository`] as part of the atomic
//! account+profile unit of work; this trait only reads.
//!
//! [`AccountRepository`]: crate::repositories::account::AccountRepository

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

/// Read-side repository for profiles attached to accounts
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile attached to an account, if any
    ///
    /// # Returns
    /// * `Ok(Some(Profile))` - The account has a profile
    /// * `Ok(None)` - The account exists without a profile (incomplete
    ///   registration)
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Whether an individual profile already uses this CPF (digits only)
    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool, DomainError>;

    /// Whether an organization profile already uses this CNPJ (digits only)
    async fn exists_by_cnpj(&self, cnpj: &str) -> Result<bool, DomainError>;

    /// Whether an organization already uses this institutional email,
    /// compared case-insensitively
    async fn exists_by_institutional_email(&self, email: &str) -> Result<bool, DomainError>;
}
