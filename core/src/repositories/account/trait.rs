//! Account repository trait defining the interface for account persistence.
//!
//! This module defines the repository pattern interface for Account entities.
//! The trait is async-first and uses Result types for proper error handling.
//! Account creation always happens together with the profile in one unit of
//! work, so the two `create_*` operations take both records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::profile::{IndividualProfile, OrganizationProfile};
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use pnr_core::repositories::AccountRepository;
/// use pnr_core::domain::entities::account::Account;
/// use pnr_core::domain::entities::profile::{IndividualProfile, OrganizationProfile};
/// use pnr_core::errors::DomainError;
/// use uuid::Uuid;
///
/// struct MySqlAccountRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl AccountRepository for MySqlAccountRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///
///     async fn create_individual(
///         &self,
///         account: &Account,
///         profile: &IndividualProfile,
///     ) -> Result<(), DomainError> {
///         Ok(())
///     }
///
///     async fn create_organization(
///         &self,
///         account: &Account,
///         profile: &OrganizationProfile,
///     ) -> Result<(), DomainError> {
///         Ok(())
///     }
///
///     async fn update_password_by_email(
///         &self,
///         email: &str,
///         password_hash: &str,
///     ) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///
///     async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its login email
    ///
    /// # Arguments
    /// * `email` - Login email; implementations must normalize it before
    ///   matching so lookups are case-insensitive
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account registered under the email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the account
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Check whether an email is already registered
    ///
    /// # Arguments
    /// * `email` - Login email, compared case-insensitively
    ///
    /// # Returns
    /// * `Ok(true)` - An account exists with the email
    /// * `Ok(false)` - The email is free
    /// * `Err(DomainError)` - Database or other error occurred
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create an account together with its individual profile
    ///
    /// Both records are written in a single transaction; either both exist
    /// afterwards or neither does. A unique-key conflict (email or CPF taken
    /// by a concurrent registration) surfaces as `DomainError::Duplicate`.
    ///
    /// # Arguments
    /// * `account` - The account to persist
    /// * `profile` - The individual profile, with `account_id` pointing at
    ///   `account.id`
    async fn create_individual(
        &self,
        account: &Account,
        profile: &IndividualProfile,
    ) -> Result<(), DomainError>;

    /// Create an account together with its organization profile
    ///
    /// Same transactional guarantee as [`create_individual`]: account and
    /// profile land atomically, and unique-key conflicts (email, CNPJ,
    /// institutional email) surface as `DomainError::Duplicate`.
    ///
    /// [`create_individual`]: AccountRepository::create_individual
    async fn create_organization(
        &self,
        account: &Account,
        profile: &OrganizationProfile,
    ) -> Result<(), DomainError>;

    /// Replace the password hash of the account registered under `email`
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - No account registered under the email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Record a successful login timestamp
    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError>;
}
