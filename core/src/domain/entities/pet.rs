//! Pet entity for the adoption catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Species accepted by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetSpecies {
    Dog,
    Cat,
    Other,
}

/// Rough size class used by adopters to filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetSex {
    Male,
    Female,
}

/// A pet listed for adoption by an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Unique identifier for the pet
    pub id: Uuid,

    /// Account id of the organization that listed the pet
    pub owner_org: Uuid,

    /// Pet's name
    pub name: String,

    pub species: PetSpecies,

    /// Breed, free text ("SRD" for mixed breed)
    pub breed: String,

    pub sex: PetSex,

    pub size: PetSize,

    /// Age in completed years
    pub age_years: u8,

    /// Weight in kilograms
    pub weight_kg: f64,

    /// Free-text description shown on the listing
    pub description: String,

    /// Whether the pet is still available for adoption
    pub available: bool,

    /// Timestamp when the listing was created
    pub created_at: DateTime<Utc>,
}

impl Pet {
    /// Creates a new available pet listing
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_org: Uuid,
        name: impl Into<String>,
        species: PetSpecies,
        breed: impl Into<String>,
        sex: PetSex,
        size: PetSize,
        age_years: u8,
        weight_kg: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_org,
            name: name.into(),
            species,
            breed: breed.into(),
            sex,
            size,
            age_years,
            weight_kg,
            description: description.into(),
            available: true,
            created_at: Utc::now(),
        }
    }

    /// Marks the pet as adopted, removing it from listings
    pub fn mark_adopted(&mut self) {
        self.available = false;
    }
}
