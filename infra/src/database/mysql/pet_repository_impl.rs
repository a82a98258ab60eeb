//! MySQL implementation of the PetRepository trait.
//!
//! Species, sex and size are stored as short lowercase strings matching
//! their serde names, so rows read the same from SQL and from JSON.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pnr_core::domain::entities::pet::{Pet, PetSex, PetSize, PetSpecies};
use pnr_core::errors::DomainError;
use pnr_core::repositories::PetRepository;

const SELECT_PET: &str = r#"
    SELECT id, owner_org, name, species, breed, sex, size,
           age_years, weight_kg, description, available, created_at
    FROM pets
"#;

/// MySQL implementation of PetRepository
pub struct MySqlPetRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPetRepository {
    /// Create a new MySQL pet repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Pet entity
    fn row_to_pet(row: &sqlx::mysql::MySqlRow) -> Result<Pet, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::persistence(format!("Failed to get id: {}", e)))?;
        let owner_org: String = row
            .try_get("owner_org")
            .map_err(|e| DomainError::persistence(format!("Failed to get owner_org: {}", e)))?;

        let species: String = row
            .try_get("species")
            .map_err(|e| DomainError::persistence(format!("Failed to get species: {}", e)))?;
        let sex: String = row
            .try_get("sex")
            .map_err(|e| DomainError::persistence(format!("Failed to get sex: {}", e)))?;
        let size: String = row
            .try_get("size")
            .map_err(|e| DomainError::persistence(format!("Failed to get size: {}", e)))?;

        Ok(Pet {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::persistence(format!("Invalid UUID: {}", e)))?,
            owner_org: Uuid::parse_str(&owner_org)
                .map_err(|e| DomainError::persistence(format!("Invalid UUID: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::persistence(format!("Failed to get name: {}", e)))?,
            species: species_from_str(&species)?,
            breed: row
                .try_get("breed")
                .map_err(|e| DomainError::persistence(format!("Failed to get breed: {}", e)))?,
            sex: sex_from_str(&sex)?,
            size: size_from_str(&size)?,
            age_years: row.try_get::<u8, _>("age_years").map_err(|e| {
                DomainError::persistence(format!("Failed to get age_years: {}", e))
            })?,
            weight_kg: row.try_get::<f64, _>("weight_kg").map_err(|e| {
                DomainError::persistence(format!("Failed to get weight_kg: {}", e))
            })?,
            description: row.try_get("description").map_err(|e| {
                DomainError::persistence(format!("Failed to get description: {}", e))
            })?,
            available: row.try_get("available").map_err(|e| {
                DomainError::persistence(format!("Failed to get available: {}", e))
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| {
                    DomainError::persistence(format!("Failed to get created_at: {}", e))
                })?,
        })
    }

    /// Map a result set to Pet entities, failing on the first bad row
    fn rows_to_pets(rows: Vec<sqlx::mysql::MySqlRow>) -> Result<Vec<Pet>, DomainError> {
        rows.iter().map(Self::row_to_pet).collect()
    }
}

fn species_to_str(species: PetSpecies) -> &'static str {
    match species {
        PetSpecies::Dog => "dog",
        PetSpecies::Cat => "cat",
        PetSpecies::Other => "other",
    }
}

fn species_from_str(s: &str) -> Result<PetSpecies, DomainError> {
    match s {
        "dog" => Ok(PetSpecies::Dog),
        "cat" => Ok(PetSpecies::Cat),
        "other" => Ok(PetSpecies::Other),
        _ => Err(DomainError::persistence(format!(
            "Unknown species value: {}",
            s
        ))),
    }
}

fn sex_to_str(sex: PetSex) -> &'static str {
    match sex {
        PetSex::Male => "male",
        PetSex::Female => "female",
    }
}

fn sex_from_str(s: &str) -> Result<PetSex, DomainError> {
    match s {
        "male" => Ok(PetSex::Male),
        "female" => Ok(PetSex::Female),
        _ => Err(DomainError::persistence(format!("Unknown sex value: {}", s))),
    }
}

fn size_to_str(size: PetSize) -> &'static str {
    match size {
        PetSize::Small => "small",
        PetSize::Medium => "medium",
        PetSize::Large => "large",
    }
}

fn size_from_str(s: &str) -> Result<PetSize, DomainError> {
    match s {
        "small" => Ok(PetSize::Small),
        "medium" => Ok(PetSize::Medium),
        "large" => Ok(PetSize::Large),
        _ => Err(DomainError::persistence(format!(
            "Unknown size value: {}",
            s
        ))),
    }
}

#[async_trait]
impl PetRepository for MySqlPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO pets (
                id, owner_org, name, species, breed, sex, size,
                age_years, weight_kg, description, available, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(pet.id.to_string())
            .bind(pet.owner_org.to_string())
            .bind(&pet.name)
            .bind(species_to_str(pet.species))
            .bind(&pet.breed)
            .bind(sex_to_str(pet.sex))
            .bind(size_to_str(pet.size))
            .bind(pet.age_years)
            .bind(pet.weight_kg)
            .bind(&pet.description)
            .bind(pet.available)
            .bind(pet.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to create pet: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_PET);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_pet(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_available(&self) -> Result<Vec<Pet>, DomainError> {
        let query = format!(
            "{} WHERE available = TRUE ORDER BY created_at DESC",
            SELECT_PET
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        Self::rows_to_pets(rows)
    }

    async fn list_by_org(&self, owner_org: Uuid) -> Result<Vec<Pet>, DomainError> {
        let query = format!(
            "{} WHERE owner_org = ? ORDER BY created_at DESC",
            SELECT_PET
        );

        let rows = sqlx::query(&query)
            .bind(owner_org.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        Self::rows_to_pets(rows)
    }

    async fn update(&self, pet: &Pet) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE pets SET
                name = ?, species = ?, breed = ?, sex = ?, size = ?,
                age_years = ?, weight_kg = ?, description = ?, available = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&pet.name)
            .bind(species_to_str(pet.species))
            .bind(&pet.breed)
            .bind(sex_to_str(pet.sex))
            .bind(size_to_str(pet.size))
            .bind(pet.age_years)
            .bind(pet.weight_kg)
            .bind(&pet.description)
            .bind(pet.available)
            .bind(pet.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Failed to update pet: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trips_through_column_strings() {
        for species in [PetSpecies::Dog, PetSpecies::Cat, PetSpecies::Other] {
            assert_eq!(species_from_str(species_to_str(species)).unwrap(), species);
        }
        for sex in [PetSex::Male, PetSex::Female] {
            assert_eq!(sex_from_str(sex_to_str(sex)).unwrap(), sex);
        }
        for size in [PetSize::Small, PetSize::Medium, PetSize::Large] {
            assert_eq!(size_from_str(size_to_str(size)).unwrap(), size);
        }
    }

    #[test]
    fn test_unknown_column_value_is_rejected() {
        assert!(species_from_str("fish").is_err());
        assert!(sex_from_str("").is_err());
        assert!(size_from_str("giant").is_err());
    }
}
