//! Authentication error taxonomy

use thiserror::Error;

use super::jwt::TokenError;
use crate::store::StoreError;

/// Auth errors
///
/// Every kind stays distinguishable here; the HTTP layer collapses the
/// credential and token kinds into one non-disclosing 401.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password must be at most 72 bytes")]
    PasswordTooLong,

    #[error("Missing or malformed Authorization header")]
    MissingCredential,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation(_) => AuthError::DuplicateEmail,
            StoreError::Database(msg) => AuthError::DatabaseError(msg),
        }
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AuthError::HashingFailed(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuthError::HashingFailed(e.to_string())
    }
}
