//! Data models for the habit server

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

pub mod auth;
pub mod habit;
pub use auth::*;
pub use habit::*;

/// Opaque account identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Fresh random identifier for a new account
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept any non-blank string as an identifier
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account model
///
/// Deliberately not `Serialize`: the password hash must never reach a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

/// Habit model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Habit {
    pub id: Uuid,
    #[serde(rename = "user_id")]
    pub owner_id: AccountId,
    pub name: String,
    pub category: String,
    pub preferred_hour: String,
    pub frequency: i32,
    pub created_at: DateTime<Utc>,
}

/// One completion of a habit
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HabitLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub completed_at: DateTime<Utc>,
}

/// Plain message body for successful mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(message: impl Into<String>, id: impl ToString) -> Self {
        Self {
            message: message.into(),
            id: Some(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_rejects_blank() {
        assert!(AccountId::parse("").is_none());
        assert!(AccountId::parse("   ").is_none());
        assert_eq!(AccountId::parse("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(AccountId::generate(), AccountId::generate());
    }

    #[test]
    fn test_account_response_has_no_hash() {
        let account = Account {
            id: AccountId::generate(),
            full_name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&AccountResponse::from(account)).unwrap();
        assert!(json.contains("ana@x.com"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
