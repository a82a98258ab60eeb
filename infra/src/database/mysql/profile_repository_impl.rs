//! MySQL implementation of the ProfileRepository trait.
//!
//! Profiles live in two tables, one per kind. An account has at most one row
//! across both, so the lookup checks individuals first and falls through to
//! organizations.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pnr_core::domain::entities::profile::{IndividualProfile, OrganizationProfile, Profile};
use pnr_core::errors::DomainError;
use pnr_core::repositories::ProfileRepository;
use pnr_shared::utils::email::normalize_email;

/// MySQL implementation of ProfileRepository
pub struct MySqlProfileRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlProfileRepository {
    /// Create a new MySQL profile repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to IndividualProfile
    fn row_to_individual(row: &sqlx::mysql::MySqlRow) -> Result<IndividualProfile, DomainError> {
        let account_id: String = row.try_get("account_id").map_err(|e| {
            DomainError::persistence(format!("Failed to get account_id: {}", e))
        })?;

        Ok(IndividualProfile {
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::persistence(format!("Invalid UUID: {}", e)))?,
            cpf: row
                .try_get("cpf")
                .map_err(|e| DomainError::persistence(format!("Failed to get cpf: {}", e)))?,
            birth_date: row.try_get::<NaiveDate, _>("birth_date").map_err(|e| {
                DomainError::persistence(format!("Failed to get birth_date: {}", e))
            })?,
            address: row
                .try_get("address")
                .map_err(|e| DomainError::persistence(format!("Failed to get address: {}", e)))?,
        })
    }

    /// Convert database row to OrganizationProfile
    fn row_to_organization(
        row: &sqlx::mysql::MySqlRow,
    ) -> Result<OrganizationProfile, DomainError> {
        let account_id: String = row.try_get("account_id").map_err(|e| {
            DomainError::persistence(format!("Failed to get account_id: {}", e))
        })?;

        Ok(OrganizationProfile {
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::persistence(format!("Invalid UUID: {}", e)))?,
            org_name: row
                .try_get("org_name")
                .map_err(|e| DomainError::persistence(format!("Failed to get org_name: {}", e)))?,
            cnpj: row
                .try_get("cnpj")
                .map_err(|e| DomainError::persistence(format!("Failed to get cnpj: {}", e)))?,
            address: row
                .try_get("address")
                .map_err(|e| DomainError::persistence(format!("Failed to get address: {}", e)))?,
            institutional_email: row.try_get("institutional_email").map_err(|e| {
                DomainError::persistence(format!("Failed to get institutional_email: {}", e))
            })?,
            responsible_name: row.try_get("responsible_name").map_err(|e| {
                DomainError::persistence(format!("Failed to get responsible_name: {}", e))
            })?,
            responsible_cpf: row.try_get("responsible_cpf").map_err(|e| {
                DomainError::persistence(format!("Failed to get responsible_cpf: {}", e))
            })?,
        })
    }

    /// Run an `EXISTS` query with a single bound value
    async fn exists_with(&self, query: &str, value: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to check profile existence: {}", e))
            })?;

        let exists: i8 = result.try_get("profile_exists").map_err(|e| {
            DomainError::persistence(format!("Failed to get existence result: {}", e))
        })?;

        Ok(exists == 1)
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let individual = sqlx::query(
            r#"
            SELECT account_id, cpf, birth_date, address
            FROM individual_profiles
            WHERE account_id = ?
            LIMIT 1
            "#,
        )
        .bind(account_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        if let Some(row) = individual {
            return Ok(Some(Profile::Individual(Self::row_to_individual(&row)?)));
        }

        let organization = sqlx::query(
            r#"
            SELECT account_id, org_name, cnpj, address,
                   institutional_email, responsible_name, responsible_cpf
            FROM organization_profiles
            WHERE account_id = ?
            LIMIT 1
            "#,
        )
        .bind(account_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        match organization {
            Some(row) => Ok(Some(Profile::Organization(Self::row_to_organization(
                &row,
            )?))),
            None => Ok(None),
        }
    }

    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM individual_profiles WHERE cpf = ?
            ) as profile_exists
        "#;
        self.exists_with(query, cpf).await
    }

    async fn exists_by_cnpj(&self, cnpj: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM organization_profiles WHERE cnpj = ?
            ) as profile_exists
        "#;
        self.exists_with(query, cnpj).await
    }

    async fn exists_by_institutional_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM organization_profiles WHERE institutional_email = ?
            ) as profile_exists
        "#;
        self.exists_with(query, &normalize_email(email)).await
    }
}
