//! Authentication models

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

use super::AccountId;
use crate::auth::MAX_PASSWORD_BYTES;

fn within_hash_limit(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut err = ValidationError::new("password_too_long");
        err.message = Some("password must be at most 72 bytes".into());
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(
        length(min = 6, message = "password must be at least 6 characters"),
        custom = "within_hash_limit"
    )]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Issued session token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

/// Account response (sanitized for API)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccountResponse {
    pub id: AccountId,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
