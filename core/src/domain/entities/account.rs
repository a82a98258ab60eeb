//! Account entity representing a registered login in the Patas na Rua portal.

use chrono::{DateTime, Utc};
use pnr_shared::utils::email::normalize_email;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity holding the credentials shared by both profile kinds
///
/// Email is the login identifier. It is stored lowercased and every lookup
/// goes through the same normalization, so comparisons are effectively
/// case-insensitive. The display name is split into parts the way the
/// registration forms collect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Login email, normalized (trimmed, lowercased)
    pub email: String,

    /// First word of the display name
    pub first_name: String,

    /// Remainder of the display name, may be empty
    pub last_name: String,

    /// Contact phone, digits only
    pub phone: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the account's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new Account instance
    pub fn new(
        email: impl AsRef<str>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email.as_ref()),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Full display name, with the empty last name handled
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

/// Split a free-text name into first/last parts on the first space
pub fn split_display_name(full_name: &str) -> (String, String) {
    let mut words = full_name.split_whitespace();
    let first = words.next().unwrap_or("").to_string();
    let rest = words.collect::<Vec<_>>().join(" ");
    (first, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_normalizes_email() {
        let account = Account::new(
            "  Maria@Example.COM ",
            "Maria",
            "Silva",
            "11987654321",
            "$2b$12$hash",
        );
        assert_eq!(account.email, "maria@example.com");
        assert!(account.last_login_at.is_none());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_display_name() {
        let account = Account::new("a@b.co", "Maria", "Silva Souza", "11987654321", "hash");
        assert_eq!(account.display_name(), "Maria Silva Souza");

        let single = Account::new("b@b.co", "Maria", "", "11987654321", "hash");
        assert_eq!(single.display_name(), "Maria");
    }

    #[test]
    fn test_split_display_name() {
        assert_eq!(
            split_display_name("Maria Silva Souza"),
            ("Maria".to_string(), "Silva Souza".to_string())
        );
        assert_eq!(
            split_display_name("Maria"),
            ("Maria".to_string(), String::new())
        );
        assert_eq!(
            split_display_name("  Maria   Silva  "),
            ("Maria".to_string(), "Silva".to_string())
        );
        assert_eq!(split_display_name(""), (String::new(), String::new()));
    }

    #[test]
    fn test_update_last_login() {
        let mut account = Account::new("a@b.co", "Ana", "", "11987654321", "hash");
        account.update_last_login();
        assert!(account.last_login_at.is_some());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account::new("a@b.co", "Ana", "", "11987654321", "secret-hash");
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
