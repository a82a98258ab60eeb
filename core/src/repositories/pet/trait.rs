//! Pet repository trait for the adoption catalog.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::pet::Pet;
use crate::errors::DomainError;

/// Repository trait for Pet entity persistence operations
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Persist a new pet listing
    async fn create(&self, pet: &Pet) -> Result<(), DomainError>;

    /// Find a pet by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError>;

    /// Pets still available for adoption, newest first
    async fn list_available(&self) -> Result<Vec<Pet>, DomainError>;

    /// Every pet listed by one organization, newest first
    async fn list_by_org(&self, owner_org: Uuid) -> Result<Vec<Pet>, DomainError>;

    /// Update an existing pet listing
    ///
    /// # Returns
    /// * `Ok(true)` - Listing updated
    /// * `Ok(false)` - No pet with the given id
    async fn update(&self, pet: &Pet) -> Result<bool, DomainError>;
}
