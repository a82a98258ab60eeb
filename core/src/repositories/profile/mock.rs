//! Mock implementation of ProfileRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;
use pnr_shared::utils::email::normalize_email;

use super::trait_::ProfileRepository;

/// Mock profile repository for testing
pub struct MockProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl MockProfileRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a profile
    pub async fn insert(&self, profile: Profile) {
        self.profiles
            .write()
            .await
            .insert(profile.account_id(), profile);
    }
}

impl Default for MockProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&account_id).cloned())
    }

    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .values()
            .any(|p| matches!(p, Profile::Individual(i) if i.cpf == cpf)))
    }

    async fn exists_by_cnpj(&self, cnpj: &str) -> Result<bool, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .values()
            .any(|p| matches!(p, Profile::Organization(o) if o.cnpj == cnpj)))
    }

    async fn exists_by_institutional_email(&self, email: &str) -> Result<bool, DomainError> {
        let normalized = normalize_email(email);
        let profiles = self.profiles.read().await;
        Ok(profiles.values().any(
            |p| matches!(p, Profile::Organization(o) if normalize_email(&o.institutional_email) == normalized),
        ))
    }
}
