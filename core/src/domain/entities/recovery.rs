//! Password recovery session keys.
//!
//! Recovery state lives entirely in the expiring key-value store under
//! three keys per email. The key formats below are a contract shared with
//! operational tooling, so they are defined once here and covered by tests.

use pnr_shared::utils::email::normalize_email;

/// Key holding the emailed 6-digit code
pub fn code_key(email: &str) -> String {
    format!("codigo:{}", normalize_email(email))
}

/// Key holding the browser-held recovery token
pub fn token_key(email: &str) -> String {
    format!("token:{}", normalize_email(email))
}

/// Key holding the verified flag for one email and token pair
pub fn verified_key(email: &str, token: &str) -> String {
    format!("verified:{}:{}", normalize_email(email), token)
}
