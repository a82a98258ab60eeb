//! Mock implementation of PetRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::pet::Pet;
use crate::errors::DomainError;

use super::trait_::PetRepository;

/// Mock pet repository for testing
pub struct MockPetRepository {
    pets: Arc<RwLock<HashMap<Uuid, Pet>>>,
}

impl MockPetRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            pets: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockPetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PetRepository for MockPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), DomainError> {
        self.pets.write().await.insert(pet.id, pet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError> {
        Ok(self.pets.read().await.get(&id).cloned())
    }

    async fn list_available(&self) -> Result<Vec<Pet>, DomainError> {
        let pets = self.pets.read().await;
        let mut available: Vec<Pet> = pets.values().filter(|p| p.available).cloned().collect();
        available.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(available)
    }

    async fn list_by_org(&self, owner_org: Uuid) -> Result<Vec<Pet>, DomainError> {
        let pets = self.pets.read().await;
        let mut listed: Vec<Pet> = pets
            .values()
            .filter(|p| p.owner_org == owner_org)
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn update(&self, pet: &Pet) -> Result<bool, DomainError> {
        let mut pets = self.pets.write().await;
        if !pets.contains_key(&pet.id) {
            return Ok(false);
        }
        pets.insert(pet.id, pet.clone());
        Ok(true)
    }
}
