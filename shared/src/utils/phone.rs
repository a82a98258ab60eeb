//! Brazilian phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Mobile: two-digit DDD (11-99), mandatory leading 9, eight subscriber digits
static BR_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(1[1-9]|[2-9][0-9])9[0-9]{8}$").unwrap()
});

// Landline: two-digit DDD (11-99), eight subscriber digits
static BR_LANDLINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(1[1-9]|[2-9][0-9])[0-9]{8}$").unwrap()
});

/// Normalize a phone number: strip formatting and the 55 country prefix
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with("55") && digits.len() > 11 {
        digits[2..].to_string()
    } else {
        digits
    }
}

/// Check if a phone number is a valid Brazilian mobile (11 digits)
pub fn is_valid_br_mobile(phone: &str) -> bool {
    BR_MOBILE_REGEX.is_match(&normalize_phone(phone))
}

/// Check if a phone number is a valid Brazilian landline (10 digits)
pub fn is_valid_br_landline(phone: &str) -> bool {
    BR_LANDLINE_REGEX.is_match(&normalize_phone(phone))
}

/// Check if a phone number is valid (mobile or landline, DDD 11-99)
pub fn is_valid_br_phone(phone: &str) -> bool {
    let normalized = normalize_phone(phone);
    is_valid_br_mobile(&normalized) || is_valid_br_landline(&normalized)
}

/// Format a Brazilian number for display
pub fn format_br_phone(phone: &str) -> Option<String> {
    let normalized = normalize_phone(phone);
    if is_valid_br_mobile(&normalized) {
        Some(format!(
            "({}) {}-{}",
            &normalized[0..2],
            &normalized[2..7],
            &normalized[7..11]
        ))
    } else if is_valid_br_landline(&normalized) {
        Some(format!(
            "({}) {}-{}",
            &normalized[0..2],
            &normalized[2..6],
            &normalized[6..10]
        ))
    } else {
        None
    }
}

/// Mask a phone number for display (e.g. 11*****4321)
pub fn mask_phone(phone: &str) -> String {
    let normalized = normalize_phone(phone);
    if normalized.len() >= 6 {
        format!(
            "{}*****{}",
            &normalized[0..2],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "*****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("(11) 98765-4321"), "11987654321");
        assert_eq!(normalize_phone("+55 11 98765-4321"), "11987654321");
        assert_eq!(normalize_phone("11 3456-7890"), "1134567890");
        // A bare 11-digit number starting with 55 is a DDD-55 number,
        // not a country prefix
        assert_eq!(normalize_phone("55987654321"), "55987654321");
    }

    #[test]
    fn test_valid_mobile() {
        assert!(is_valid_br_mobile("11987654321"));
        assert!(is_valid_br_mobile("(21) 99876-5432"));
        assert!(is_valid_br_mobile("+55 85 91234-5678"));
    }

    #[test]
    fn test_valid_landline() {
        assert!(is_valid_br_landline("1134567890"));
        assert!(is_valid_br_landline("(85) 3234-5678"));
    }

    #[test]
    fn test_invalid_ddd() {
        // DDD must be between 11 and 99
        assert!(!is_valid_br_phone("1034567890"));
        assert!(!is_valid_br_phone("0134567890"));
        assert!(!is_valid_br_phone("00987654321"));
    }

    #[test]
    fn test_eleven_digits_require_mobile_prefix() {
        assert!(!is_valid_br_phone("11887654321"));
        assert!(is_valid_br_phone("11987654321"));
    }

    #[test]
    fn test_invalid_lengths() {
        assert!(!is_valid_br_phone(""));
        assert!(!is_valid_br_phone("119876543"));
        assert!(!is_valid_br_phone("119876543210"));
    }

    #[test]
    fn test_format_br_phone() {
        assert_eq!(
            format_br_phone("11987654321"),
            Some("(11) 98765-4321".to_string())
        );
        assert_eq!(
            format_br_phone("1134567890"),
            Some("(11) 3456-7890".to_string())
        );
        assert_eq!(format_br_phone("123"), None);
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("11987654321"), "11*****4321");
        assert_eq!(mask_phone("123"), "*****");
    }
}
