//! Pet catalog operations behind the organization area

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing;
use uuid::Uuid;

use crate::domain::entities::pet::{Pet, PetSex, PetSize, PetSpecies};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::PetRepository;

const MSG_PET_FIELDS_REQUIRED: &str =
    "All fields are required | Todos os campos são obrigatórios";
const MSG_NOT_NUMERIC: &str =
    "Weight and age must be numbers | Os campos peso e idade devem ser números";
const MSG_UNKNOWN_SPECIES: &str = "Unknown species | Espécie desconhecida";
const MSG_UNKNOWN_SEX: &str = "Unknown sex | Sexo desconhecido";
const MSG_UNKNOWN_SIZE: &str = "Unknown size | Porte desconhecido";
const MSG_WEIGHT_OUT_OF_RANGE: &str =
    "Weight must be between 0 and 120 kg | O peso deve estar entre 0 e 120 kg";
const MSG_AGE_OUT_OF_RANGE: &str =
    "Age must be between 0 and 30 years | A idade deve estar entre 0 e 30 anos";

/// Oldest accepted age, in completed years
const MAX_AGE_YEARS: u8 = 30;
/// Heaviest accepted weight, in kilograms
const MAX_WEIGHT_KG: f64 = 120.0;

/// New listing as submitted by the organization form
///
/// Numeric and categorical fields arrive as the raw form strings; parsing
/// them is this service's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPetRequest {
    pub name: String,
    /// "cachorro", "gato" or "outro"
    pub species: String,
    /// Free text, "SRD" for mixed breed
    pub breed: String,
    /// "macho" or "fêmea"
    pub sex: String,
    /// "pequeno", "médio" or "grande"
    pub size: String,
    /// Completed years, decimal digits
    pub age: String,
    /// Kilograms; both "12.5" and the Brazilian "12,5" are accepted
    pub weight: String,
    /// Optional free text for the listing page
    #[serde(default)]
    pub description: String,
}

/// Catalog service for pet listings
///
/// Validates and parses organization form input, then delegates storage to
/// the repository. Lookup misses surface as [`DomainError::NotFound`].
pub struct PetService<R: PetRepository> {
    pets: Arc<R>,
}

impl<R: PetRepository> PetService<R> {
    pub fn new(pets: Arc<R>) -> Self {
        Self { pets }
    }

    /// Register a new pet listing for an organization.
    ///
    /// Checks field presence, parses the categorical fields, and parses
    /// weight and age with bounds checks. Weight accepts a decimal comma.
    /// Returns the created listing.
    pub async fn register_pet(
        &self,
        owner_org: Uuid,
        request: &NewPetRequest,
    ) -> DomainResult<Pet> {
        let required = [
            request.name.as_str(),
            request.species.as_str(),
            request.breed.as_str(),
            request.sex.as_str(),
            request.size.as_str(),
            request.age.as_str(),
            request.weight.as_str(),
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DomainError::validation(MSG_PET_FIELDS_REQUIRED));
        }

        let species = parse_species(&request.species)
            .ok_or_else(|| DomainError::validation(MSG_UNKNOWN_SPECIES))?;
        let sex =
            parse_sex(&request.sex).ok_or_else(|| DomainError::validation(MSG_UNKNOWN_SEX))?;
        let size =
            parse_size(&request.size).ok_or_else(|| DomainError::validation(MSG_UNKNOWN_SIZE))?;

        let weight_kg = parse_weight(&request.weight)
            .ok_or_else(|| DomainError::validation(MSG_NOT_NUMERIC))?;
        if !(weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG) {
            return Err(DomainError::validation(MSG_WEIGHT_OUT_OF_RANGE));
        }

        let age_years: u8 = request
            .age
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(MSG_NOT_NUMERIC))?;
        if age_years > MAX_AGE_YEARS {
            return Err(DomainError::validation(MSG_AGE_OUT_OF_RANGE));
        }

        let pet = Pet::new(
            owner_org,
            request.name.trim(),
            species,
            request.breed.trim(),
            sex,
            size,
            age_years,
            weight_kg,
            request.description.trim(),
        );
        self.pets.create(&pet).await?;

        tracing::info!(
            pet_id = %pet.id,
            owner_org = %owner_org,
            species = ?species,
            event = "pet_registered",
            "Pet listing created"
        );

        Ok(pet)
    }

    /// Pets currently open for adoption, newest first
    pub async fn available_pets(&self) -> DomainResult<Vec<Pet>> {
        self.pets.list_available().await
    }

    /// Every listing of one organization, adopted ones included
    pub async fn pets_of_org(&self, owner_org: Uuid) -> DomainResult<Vec<Pet>> {
        self.pets.list_by_org(owner_org).await
    }

    /// Listing page lookup
    pub async fn pet_detail(&self, id: Uuid) -> DomainResult<Pet> {
        self.pets.find_by_id(id).await?.ok_or(DomainError::NotFound {
            resource: "pet".to_string(),
        })
    }

    /// Close a listing after an adoption
    pub async fn mark_adopted(&self, id: Uuid) -> DomainResult<()> {
        let mut pet = self.pet_detail(id).await?;
        pet.mark_adopted();
        if !self.pets.update(&pet).await? {
            return Err(DomainError::NotFound {
                resource: "pet".to_string(),
            });
        }

        tracing::info!(
            pet_id = %pet.id,
            owner_org = %pet.owner_org,
            event = "pet_adopted",
            "Pet listing closed after adoption"
        );

        Ok(())
    }
}

fn parse_species(raw: &str) -> Option<PetSpecies> {
    match raw.trim().to_lowercase().as_str() {
        "cachorro" | "cão" | "cao" | "c" => Some(PetSpecies::Dog),
        "gato" | "g" => Some(PetSpecies::Cat),
        "outro" | "outra" => Some(PetSpecies::Other),
        _ => None,
    }
}

fn parse_sex(raw: &str) -> Option<PetSex> {
    match raw.trim().to_lowercase().as_str() {
        "macho" | "m" => Some(PetSex::Male),
        "fêmea" | "femea" | "f" => Some(PetSex::Female),
        _ => None,
    }
}

fn parse_size(raw: &str) -> Option<PetSize> {
    match raw.trim().to_lowercase().as_str() {
        "pequeno" | "p" => Some(PetSize::Small),
        "médio" | "medio" | "m" => Some(PetSize::Medium),
        "grande" | "g" => Some(PetSize::Large),
        _ => None,
    }
}

/// Parse a weight field, accepting a decimal comma ("12,5")
fn parse_weight(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    let value: f64 = normalized.parse().ok()?;
    value.is_finite().then_some(value)
}
