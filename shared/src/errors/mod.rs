//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized error shape shared by every surface that reports failures
///
/// `details` carries optional field-level context, such as which field
/// failed validation or which resource conflicted. Ordered map so payloads
/// are stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,

    /// Human-readable message, bilingual where user-facing
    pub message: String,

    /// Optional field-level context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,

    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach one detail entry, creating the map on first use
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Error codes shared across the portal
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const INCOMPLETE_PROFILE: &str = "INCOMPLETE_PROFILE";
    pub const DUPLICATE_RESOURCE: &str = "DUPLICATE_RESOURCE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const RECOVERY_TOKEN_INVALID: &str = "RECOVERY_TOKEN_INVALID";
    pub const RECOVERY_CODE_EXPIRED: &str = "RECOVERY_CODE_EXPIRED";
    pub const RECOVERY_CODE_INVALID: &str = "RECOVERY_CODE_INVALID";
    pub const RECOVERY_NOT_VERIFIED: &str = "RECOVERY_NOT_VERIFIED";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const MAIL_ERROR: &str = "MAIL_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Convert a domain error into the serialized response shape
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
