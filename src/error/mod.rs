//! Centralized API error handling
//!
//! This module provides a unified error type for API responses with proper
//! HTTP status code mapping and JSON error responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::{AuthError, TokenError};
use crate::habits::HabitError;

/// Shown for every failed login, whether or not the email exists
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password";

/// Shown for every rejected bearer token
pub const INVALID_TOKEN_MESSAGE: &str = "Missing or invalid token";

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in the response
#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn is_server_error(&self) -> bool {
        matches!(self, ApiError::InternalError(_) | ApiError::DatabaseError(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let detail = self.to_string();

        // Server errors keep their detail in the logs only
        let message = if self.is_server_error() {
            tracing::error!(error = %detail, code = %error_code, "Server error occurred");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %detail, code = %error_code, "Client error occurred");
            detail
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: error_code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail | AuthError::PasswordTooLong => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::AccountNotFound | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
            }
            AuthError::Token(TokenError::EncodingFailed(e)) => ApiError::InternalError(e),
            AuthError::MissingCredential | AuthError::Token(_) => {
                ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            }
            AuthError::DatabaseError(e) => ApiError::DatabaseError(e),
            AuthError::HashingFailed(e) => ApiError::InternalError(e),
        }
    }
}

impl From<HabitError> for ApiError {
    fn from(err: HabitError) -> Self {
        match err {
            HabitError::NotFound => ApiError::NotFound(err.to_string()),
            HabitError::DatabaseError(e) => ApiError::DatabaseError(e),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON: {}", err.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path: {}", err.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query: {}", err.body_text()))
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ValidationError("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::DatabaseError("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let not_found = ApiError::from(AuthError::AccountNotFound);
        let bad_password = ApiError::from(AuthError::InvalidCredentials);

        assert_eq!(not_found.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(not_found.status_code(), bad_password.status_code());
        assert_eq!(not_found.to_string(), bad_password.to_string());
    }

    #[test]
    fn test_token_failures_collapse_to_unauthorized() {
        let kinds = [
            AuthError::MissingCredential,
            AuthError::Token(TokenError::MalformedToken("x".to_string())),
            AuthError::Token(TokenError::InvalidSignature),
            AuthError::Token(TokenError::MissingExpiry),
            AuthError::Token(TokenError::Expired),
            AuthError::Token(TokenError::MissingSubject),
        ];

        let messages: Vec<String> = kinds
            .into_iter()
            .map(|kind| {
                let api = ApiError::from(kind);
                assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);
                api.to_string()
            })
            .collect();

        assert!(messages.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_duplicate_email_is_bad_request() {
        assert_eq!(
            ApiError::from(AuthError::DuplicateEmail).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_overlong_password_is_bad_request() {
        assert_eq!(
            ApiError::from(AuthError::PasswordTooLong).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_detail() {
        let response = ApiError::DatabaseError("password=hunter2".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("DATABASE_ERROR"));
        assert!(!body.contains("hunter2"));
    }
}
