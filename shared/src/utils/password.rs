//! Password strength policy
//!
//! The policy is deliberately byte-length based (bcrypt operates on bytes)
//! and rejects a short denylist of passwords seen in credential-stuffing
//! lists, checked case-insensitively.

/// Minimum password length in bytes
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in bytes
pub const MAX_PASSWORD_LENGTH: usize = 128;

// Most common passwords from public breach corpora, plus the Portuguese
// variants our support desk keeps seeing
const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "12345678",
    "123456789",
    "1234567890",
    "102030",
    "654321",
    "987654321",
    "111111",
    "123123",
    "password",
    "password1",
    "password123",
    "senha",
    "senha123",
    "senha1234",
    "qwerty",
    "qwerty123",
    "abc123",
    "abcd1234",
    "admin",
    "admin123",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
    "iloveyou",
    "brasil",
    "brasil123",
    "mudar123",
    "teste123",
];

/// Why a password was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    TooShort,
    TooLong,
    TooCommon,
    MissingLetter,
    MissingDigit,
    MissingSpecial,
}

impl std::fmt::Display for PasswordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordIssue::TooShort => {
                write!(f, "Password must be at least 8 characters | A senha deve ter pelo menos 8 caracteres")
            }
            PasswordIssue::TooLong => {
                write!(f, "Password must be at most 128 characters | A senha deve ter no máximo 128 caracteres")
            }
            PasswordIssue::TooCommon => {
                write!(f, "Password is too common | A senha é muito comum")
            }
            PasswordIssue::MissingLetter => {
                write!(f, "Password must contain a letter | A senha deve conter uma letra")
            }
            PasswordIssue::MissingDigit => {
                write!(f, "Password must contain a number | A senha deve conter um número")
            }
            PasswordIssue::MissingSpecial => {
                write!(f, "Password must contain a special character | A senha deve conter um caractere especial")
            }
        }
    }
}

/// Validate a password against the portal policy
///
/// Checks run in a fixed order (length, denylist, character classes) and
/// the first failure is reported.
pub fn validate_password_strength(password: &str) -> Result<(), PasswordIssue> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordIssue::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordIssue::TooLong);
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(PasswordIssue::TooCommon);
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(PasswordIssue::MissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(PasswordIssue::MissingSpecial);
    }

    Ok(())
}
