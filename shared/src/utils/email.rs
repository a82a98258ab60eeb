//! Email address utilities
//!
//! Format validation only. Deliverability (MX lookup) is a separate,
//! optional concern owned by the caller.

use once_cell::sync::Lazy;
use regex::Regex;

// Single @, non-empty local part, domain with at least one dot, no whitespace
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

const MAX_EMAIL_LENGTH: usize = 254;

/// Normalize an email address for storage and comparison
///
/// Addresses are compared case-insensitively across the whole system, so
/// the normalized (trimmed, lowercased) form is the canonical one.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a plausible format
pub fn is_valid_email_format(email: &str) -> bool {
    let normalized = normalize_email(email);
    normalized.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(&normalized)
}

/// Extract the domain part of an email address
pub fn email_domain(email: &str) -> Option<String> {
    let normalized = normalize_email(email);
    if !is_valid_email_format(&normalized) {
        return None;
    }
    normalized.split('@').nth(1).map(|d| d.to_string())
}

/// Mask an email address for display and logs (e.g. j***@example.com)
pub fn mask_email(email: &str) -> String {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
