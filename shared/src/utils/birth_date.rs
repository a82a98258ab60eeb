//! Birth date validation for individual registrations

use chrono::{Datelike, NaiveDate};

/// Minimum age to register an account
pub const MIN_AGE_YEARS: i32 = 18;

/// Maximum plausible age for a birth date
pub const MAX_AGE_YEARS: i32 = 120;

/// Why a birth date was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthDateError {
    InFuture,
    TooYoung,
    TooOld,
}

impl std::fmt::Display for BirthDateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BirthDateError::InFuture => {
                write!(f, "Birth date cannot be in the future | Data de nascimento não pode estar no futuro")
            }
            BirthDateError::TooYoung => {
                write!(f, "You must be at least 18 years old | É necessário ter pelo menos 18 anos")
            }
            BirthDateError::TooOld => {
                write!(f, "Birth date is not plausible | Data de nascimento não é plausível")
            }
        }
    }
}

/// Parse a birth date from a form value
///
/// Accepts ISO (`2000-01-31`) and Brazilian (`31/01/2000`) notations.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

/// Completed years between `birth_date` and `today`
///
/// A birthday that has not happened yet this year does not count.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Validate a birth date against `today`
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), BirthDateError> {
    if birth_date > today {
        return Err(BirthDateError::InFuture);
    }
    let age = age_on(birth_date, today);
    if age < MIN_AGE_YEARS {
        return Err(BirthDateError::TooYoung);
    }
    if age > MAX_AGE_YEARS {
        return Err(BirthDateError::TooOld);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date("2000-01-31"), Some(date(2000, 1, 31)));
        assert_eq!(parse_birth_date("31/01/2000"), Some(date(2000, 1, 31)));
        assert_eq!(parse_birth_date(" 2000-01-31 "), Some(date(2000, 1, 31)));
        assert_eq!(parse_birth_date("2000-13-01"), None);
        assert_eq!(parse_birth_date("yesterday"), None);
    }

    #[test]
    fn test_age_counts_completed_years_only() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_on(birth, date(2024, 6, 14)), 23);
        assert_eq!(age_on(birth, date(2024, 6, 15)), 24);
        assert_eq!(age_on(birth, date(2024, 6, 16)), 24);
    }

    #[test]
    fn test_future_date_rejected() {
        let today = date(2024, 6, 15);
        assert_eq!(
            validate_birth_date(date(2024, 6, 16), today),
            Err(BirthDateError::InFuture)
        );
    }

    #[test]
    fn test_under_18_rejected() {
        let today = date(2024, 6, 15);
        // 18th birthday is tomorrow
        assert_eq!(
            validate_birth_date(date(2006, 6, 16), today),
            Err(BirthDateError::TooYoung)
        );
        // 18th birthday is today
        assert_eq!(validate_birth_date(date(2006, 6, 15), today), Ok(()));
    }

    #[test]
    fn test_over_120_rejected() {
        let today = date(2024, 6, 15);
        assert_eq!(validate_birth_date(date(1904, 6, 15), today), Ok(()));
        assert_eq!(
            validate_birth_date(date(1903, 6, 14), today),
            Err(BirthDateError::TooOld)
        );
    }
}
