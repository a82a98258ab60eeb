//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{
    AuthError, RateLimitError, RecoveryError,
    extract_english_message, extract_portuguese_message,
};

use pnr_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Already registered: {resource} | Já cadastrado: {resource}")]
    Duplicate { resource: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Store or downstream-service failure. The message is for server-side
    /// logs; users get a generic retry prompt.
    #[error("Service temporarily unavailable. Please try again | Serviço temporariamente indisponível. Tente novamente")]
    Persistence { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    #[error(transparent)]
    Recovery(#[from] RecoveryError),
}

impl DomainError {
    /// Validation failure with a user-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Store failure; `message` stays server-side
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let code = match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Duplicate { .. } => error_codes::DUPLICATE_RESOURCE,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Persistence { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Auth(AuthError::IncompleteProfile) => error_codes::INCOMPLETE_PROFILE,
            DomainError::Auth(AuthError::MailServiceFailure) => error_codes::MAIL_ERROR,
            DomainError::RateLimit(_) => error_codes::RATE_LIMIT_EXCEEDED,
            DomainError::Recovery(RecoveryError::InvalidToken) => {
                error_codes::RECOVERY_TOKEN_INVALID
            }
            DomainError::Recovery(RecoveryError::CodeExpired) => {
                error_codes::RECOVERY_CODE_EXPIRED
            }
            DomainError::Recovery(RecoveryError::CodeMismatch) => {
                error_codes::RECOVERY_CODE_INVALID
            }
            DomainError::Recovery(RecoveryError::NotVerified) => {
                error_codes::RECOVERY_NOT_VERIFIED
            }
        };
        ErrorResponse::new(code, self.to_string())
    }
}
