//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::profile::{IndividualProfile, OrganizationProfile, Profile};
use crate::errors::DomainError;
use pnr_shared::utils::email::normalize_email;

use super::trait_::AccountRepository;

/// Mock account repository for testing
///
/// Stores accounts and their profiles in memory and enforces the same
/// uniqueness rules as the MySQL schema (email, CPF, CNPJ, institutional
/// email).
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed an account without a profile (incomplete registration)
    pub async fn insert_account(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Seed an account with its profile
    pub async fn insert_with_profile(&self, account: Account, profile: Profile) {
        let id = account.id;
        self.accounts.write().await.insert(id, account);
        self.profiles.write().await.insert(id, profile);
    }

    /// Profile stored for an account, if any
    pub async fn profile_of(&self, account_id: Uuid) -> Option<Profile> {
        self.profiles.read().await.get(&account_id).cloned()
    }

    /// Number of stored accounts
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let normalized = normalize_email(email);
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == normalized).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create_individual(
        &self,
        account: &Account,
        profile: &IndividualProfile,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut profiles = self.profiles.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Duplicate {
                resource: "email".to_string(),
            });
        }
        if profiles.values().any(|p| matches!(p, Profile::Individual(i) if i.cpf == profile.cpf)) {
            return Err(DomainError::Duplicate {
                resource: "cpf".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        profiles.insert(account.id, Profile::Individual(profile.clone()));
        Ok(())
    }

    async fn create_organization(
        &self,
        account: &Account,
        profile: &OrganizationProfile,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut profiles = self.profiles.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Duplicate {
                resource: "email".to_string(),
            });
        }
        for existing in profiles.values() {
            if let Profile::Organization(o) = existing {
                if o.cnpj == profile.cnpj {
                    return Err(DomainError::Duplicate {
                        resource: "cnpj".to_string(),
                    });
                }
                if o.institutional_email == profile.institutional_email {
                    return Err(DomainError::Duplicate {
                        resource: "institutional_email".to_string(),
                    });
                }
            }
        }

        accounts.insert(account.id, account.clone());
        profiles.insert(account.id, Profile::Organization(profile.clone()));
        Ok(())
    }

    async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let normalized = normalize_email(email);
        let mut accounts = self.accounts.write().await;
        match accounts.values_mut().find(|a| a.email == normalized) {
            Some(account) => {
                account.set_password_hash(password_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&id) {
            account.update_last_login();
        }
        Ok(())
    }
}
