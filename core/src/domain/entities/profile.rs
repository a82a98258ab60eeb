//! Profile entities attached to accounts.
//!
//! Every account carries at most one profile, either an individual adopter
//! or an animal-welfare organization. The two variants share nothing beyond
//! the owning account id, so they are a tagged enum rather than one wide
//! struct of optional columns. Display names live on the account itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Individual adopter profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualProfile {
    /// Owning account
    pub account_id: Uuid,

    /// CPF, digits only, unique across individuals
    pub cpf: String,

    /// Date of birth
    pub birth_date: NaiveDate,

    /// Street address
    pub address: String,
}

/// Animal-welfare organization profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    /// Owning account
    pub account_id: Uuid,

    /// Organization display name
    pub org_name: String,

    /// CNPJ, digits only, unique across organizations
    pub cnpj: String,

    /// Street address of the headquarters
    pub address: String,

    /// Institutional contact email, unique across organizations
    pub institutional_email: String,

    /// Name of the person responsible for the organization
    pub responsible_name: String,

    /// CPF of the responsible person, digits only
    pub responsible_cpf: String,
}

/// Profile attached to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Individual(IndividualProfile),
    Organization(OrganizationProfile),
}

impl Profile {
    /// Owning account id
    pub fn account_id(&self) -> Uuid {
        match self {
            Profile::Individual(p) => p.account_id,
            Profile::Organization(p) => p.account_id,
        }
    }

    pub fn is_individual(&self) -> bool {
        matches!(self, Profile::Individual(_))
    }

    pub fn is_organization(&self) -> bool {
        matches!(self, Profile::Organization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> IndividualProfile {
        IndividualProfile {
            account_id: Uuid::new_v4(),
            cpf: "52998224725".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
            address: "Rua das Flores, 123".to_string(),
        }
    }

    #[test]
    fn test_variant_checks() {
        let profile = Profile::Individual(individual());
        assert!(profile.is_individual());
        assert!(!profile.is_organization());

        let org = Profile::Organization(OrganizationProfile {
            account_id: Uuid::new_v4(),
            org_name: "Abrigo Esperança".to_string(),
            cnpj: "11222333000181".to_string(),
            address: "Av. Paulista, 1000".to_string(),
            institutional_email: "contato@abrigoesperanca.org.br".to_string(),
            responsible_name: "João Pereira".to_string(),
            responsible_cpf: "11144477735".to_string(),
        });
        assert!(org.is_organization());
    }

    #[test]
    fn test_account_id_reaches_through_the_variant() {
        let inner = individual();
        let id = inner.account_id;
        assert_eq!(Profile::Individual(inner).account_id(), id);
    }

    #[test]
    fn test_profile_serializes_with_kind_tag() {
        let profile = Profile::Individual(individual());
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"kind\":\"individual\""));
    }
}
