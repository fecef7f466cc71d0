//! Authentication middleware
//!
//! Request authenticator: pulls the bearer token out of `Authorization`,
//! verifies it and hands the handler a typed identity. A handler that takes
//! `AuthenticatedAccount` never runs for an unauthenticated request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;

use crate::auth::{AuthError, AuthService, TokenVerifier};
use crate::error::ApiError;
use crate::models::AccountId;

/// Required scheme prefix, matched case-sensitively
pub const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated account extracted from the bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Extract the raw token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredential)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingCredential),
    }
}

/// Authenticate a request from its headers
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
) -> Result<AuthenticatedAccount, AuthError> {
    let token = bearer_token(headers)?;
    let account_id = verifier.verify(token)?;
    Ok(AuthenticatedAccount { account_id })
}

/// Extractor for authenticated accounts
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(account: AuthenticatedAccount) -> impl IntoResponse {
///     format!("Hello, {}", account.account_id)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        authenticate(&parts.headers, auth_service.verifier()).map_err(|e| {
            tracing::debug!(reason = %e, path = %parts.uri.path(), "Request rejected");
            ApiError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenError, TokenIssuer};
    use crate::config::SigningSecret;
    use axum::http::HeaderValue;

    const SECRET: &str = "middleware-test-secret-0123456789";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SigningSecret::new(SECRET).unwrap())
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        for value in ["Basic abc", "bearer abc", "BEARER abc", "Token abc", "Bearerabc"] {
            assert!(
                matches!(
                    bearer_token(&headers_with(value)),
                    Err(AuthError::MissingCredential)
                ),
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_empty_remainder() {
        assert!(matches!(
            bearer_token(&headers_with("Bearer")),
            Err(AuthError::MissingCredential)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer ")),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn test_extracts_token() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn test_authenticate_binds_subject() {
        let issuer = TokenIssuer::new(SigningSecret::new(SECRET).unwrap());
        let id = AccountId::parse("account-1").unwrap();
        let issued = issuer.issue(&id).unwrap();

        let account =
            authenticate(&headers_with(&format!("Bearer {}", issued.token)), &verifier())
                .unwrap();
        assert_eq!(account.account_id, id);
    }

    #[test]
    fn test_authenticate_propagates_verifier_errors() {
        assert!(matches!(
            authenticate(&headers_with("Bearer not-a-token"), &verifier()),
            Err(AuthError::Token(TokenError::MalformedToken(_)))
        ));
    }
}
