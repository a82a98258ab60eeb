//! Form submission types for the account flows
//!
//! Each struct mirrors one browser form. Fields arrive as the user typed
//! them; normalization (trimming, case folding, stripping punctuation)
//! happens inside the service, not here.

use serde::{Deserialize, Serialize};

/// Login form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Checkbox state; absent in the form body means unchecked
    #[serde(default)]
    pub remember: bool,
    /// Client address used for rate limiting
    pub ip: String,
}

/// Individual (pessoa física) registration form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterIndividualRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Birth date as typed, ISO `YYYY-MM-DD`
    pub birth_date: String,
    pub cpf: String,
    pub address: String,
    pub password: String,
    pub password_confirm: String,
    pub ip: String,
}

/// Organization (ONG) registration form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterOrganizationRequest {
    pub org_name: String,
    pub email: String,
    pub phone: String,
    pub cnpj: String,
    pub address: String,
    pub institutional_email: String,
    pub responsible_name: String,
    pub responsible_cpf: String,
    pub password: String,
    pub password_confirm: String,
    pub ip: String,
}

/// First step of password recovery: the email asking for a code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
    pub ip: String,
}

/// Second step: the emailed code plus the browser-held token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSubmission {
    pub email: String,
    pub token: String,
    pub code: String,
    pub ip: String,
}

/// Final step: the replacement password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPasswordSubmission {
    pub email: String,
    pub token: String,
    pub password: String,
    pub password_confirm: String,
}
