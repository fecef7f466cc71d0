//! Authentication HTTP handlers
//!
//! Endpoints for registration, login and token refresh.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

use super::AuthenticatedAccount;
use crate::auth::{AuthError, IssuedToken};
use crate::error::{ApiError, ApiResult};
use crate::middleware::bearer_token;
use crate::models::{AccountResponse, LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use crate::state::AppState;

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
        }
    }
}

/// POST /register - Create an account
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let account_id = state
        .auth_service
        .register(&req.full_name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Account created", account_id)),
    ))
}

/// POST /login - Exchange email and password for a session token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let issued = state
        .auth_service
        .login(&req.email, &req.password)
        .await
        .map_err(|e| {
            // The distinction stays in the logs; the response is the same either way
            tracing::info!(reason = %e, "Login rejected");
            ApiError::from(e)
        })?;

    Ok(Json(issued.into()))
}

/// POST /refresh - Exchange a valid bearer token for a fresh one
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<TokenResponse>> {
    let token = bearer_token(&headers)?;
    let issued = state.auth_service.refresh(token)?;

    Ok(Json(issued.into()))
}

/// GET /me - Get the authenticated account
pub async fn me(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<AccountResponse>> {
    let account = state
        .auth_service
        .get_account(&account.account_id)
        .await
        .map_err(|e| match e {
            AuthError::AccountNotFound => ApiError::NotFound("Account not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(account.into()))
}
