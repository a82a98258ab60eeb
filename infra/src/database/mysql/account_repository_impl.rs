//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts and their profiles are written together in one transaction so a
//! registration never leaves a half-created record behind. Duplicate keys
//! (email, CPF, CNPJ, institutional email) are enforced by unique indexes
//! and surfaced as `DomainError::Duplicate` with the conflicting resource.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pnr_core::domain::entities::account::Account;
use pnr_core::domain::entities::profile::{IndividualProfile, OrganizationProfile};
use pnr_core::errors::DomainError;
use pnr_core::repositories::AccountRepository;
use pnr_shared::utils::email::normalize_email;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, first_name, last_name, phone,
           password_hash, created_at, updated_at, last_login_at
    FROM accounts
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::persistence(format!("Failed to get id: {}", e)))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::persistence(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::persistence(format!("Failed to get email: {}", e)))?,
            first_name: row.try_get("first_name").map_err(|e| {
                DomainError::persistence(format!("Failed to get first_name: {}", e))
            })?,
            last_name: row.try_get("last_name").map_err(|e| {
                DomainError::persistence(format!("Failed to get last_name: {}", e))
            })?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::persistence(format!("Failed to get phone: {}", e)))?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::persistence(format!("Failed to get password_hash: {}", e))
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| {
                    DomainError::persistence(format!("Failed to get created_at: {}", e))
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| {
                    DomainError::persistence(format!("Failed to get updated_at: {}", e))
                })?,
            last_login_at: row.try_get("last_login_at").map_err(|e| {
                DomainError::persistence(format!("Failed to get last_login_at: {}", e))
            })?,
        })
    }
}

/// Map an insert failure, turning unique-index conflicts into `Duplicate`
fn map_insert_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return DomainError::Duplicate {
                resource: duplicate_resource(db_err.message()).to_string(),
            };
        }
    }
    DomainError::persistence(format!("Failed to create account: {}", e))
}

/// Name the conflicting resource from the unique index in the MySQL message
///
/// MySQL reports duplicates as `Duplicate entry '...' for key 'table.index'`,
/// so the index name identifies which column collided.
fn duplicate_resource(message: &str) -> &'static str {
    if message.contains("uq_individual_profiles_cpf") {
        "cpf"
    } else if message.contains("uq_organization_profiles_institutional_email") {
        "institutional_email"
    } else if message.contains("uq_organization_profiles_cnpj") {
        "cnpj"
    } else {
        "email"
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_ACCOUNT);

        let result = sqlx::query(&query)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_ACCOUNT);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::persistence(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM accounts WHERE email = ?
            ) as account_exists
        "#;

        let result = sqlx::query(query)
            .bind(normalize_email(email))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to check account existence: {}", e))
            })?;

        let exists: i8 = result.try_get("account_exists").map_err(|e| {
            DomainError::persistence(format!("Failed to get existence result: {}", e))
        })?;

        Ok(exists == 1)
    }

    async fn create_individual(
        &self,
        account: &Account,
        profile: &IndividualProfile,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::persistence(format!("Failed to begin transaction: {}", e))
        })?;

        insert_account(&mut tx, account).await?;

        let query = r#"
            INSERT INTO individual_profiles (account_id, cpf, birth_date, address)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.account_id.to_string())
            .bind(&profile.cpf)
            .bind(profile.birth_date)
            .bind(&profile.address)
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        tx.commit().await.map_err(|e| {
            DomainError::persistence(format!("Failed to commit registration: {}", e))
        })?;

        Ok(())
    }

    async fn create_organization(
        &self,
        account: &Account,
        profile: &OrganizationProfile,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::persistence(format!("Failed to begin transaction: {}", e))
        })?;

        insert_account(&mut tx, account).await?;

        let query = r#"
            INSERT INTO organization_profiles (
                account_id, org_name, cnpj, address,
                institutional_email, responsible_name, responsible_cpf
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.account_id.to_string())
            .bind(&profile.org_name)
            .bind(&profile.cnpj)
            .bind(&profile.address)
            .bind(&profile.institutional_email)
            .bind(&profile.responsible_name)
            .bind(&profile.responsible_cpf)
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        tx.commit().await.map_err(|e| {
            DomainError::persistence(format!("Failed to commit registration: {}", e))
        })?;

        Ok(())
    }

    async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE accounts SET password_hash = ?, updated_at = ?
            WHERE email = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(normalize_email(email))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to update password: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        let now = Utc::now();
        let query = r#"
            UPDATE accounts SET last_login_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::persistence(format!("Failed to record login: {}", e))
            })?;

        Ok(())
    }
}

/// Insert the account row inside an open registration transaction
async fn insert_account(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    account: &Account,
) -> Result<(), DomainError> {
    let query = r#"
        INSERT INTO accounts (
            id, email, first_name, last_name, phone,
            password_hash, created_at, updated_at, last_login_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
    "#;

    sqlx::query(query)
        .bind(account.id.to_string())
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.phone)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .bind(account.last_login_at)
        .execute(&mut **tx)
        .await
        .map_err(map_insert_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_resource_from_index_name() {
        assert_eq!(
            duplicate_resource(
                "Duplicate entry 'maria@example.com' for key 'accounts.uq_accounts_email'"
            ),
            "email"
        );
        assert_eq!(
            duplicate_resource(
                "Duplicate entry '52998224725' for key 'individual_profiles.uq_individual_profiles_cpf'"
            ),
            "cpf"
        );
        assert_eq!(
            duplicate_resource(
                "Duplicate entry '11222333000181' for key 'organization_profiles.uq_organization_profiles_cnpj'"
            ),
            "cnpj"
        );
        assert_eq!(
            duplicate_resource(
                "Duplicate entry 'contato@ong.org' for key 'organization_profiles.uq_organization_profiles_institutional_email'"
            ),
            "institutional_email"
        );
    }

    #[test]
    fn test_unknown_index_falls_back_to_email() {
        assert_eq!(duplicate_resource("Duplicate entry for key 'other'"), "email");
    }
}
