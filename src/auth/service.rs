//! Authentication service
//!
//! Ties the credential store to token issuance: register, login, refresh.

use std::sync::Arc;

use super::credentials::CredentialStore;
use super::error::AuthError;
use super::jwt::{IssuedToken, TokenIssuer, TokenVerifier};
use crate::config::SigningSecret;
use crate::models::{Account, AccountId};
use crate::store::AccountStore;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialStore,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(accounts: Arc<dyn AccountStore>, secret: SigningSecret) -> Self {
        Self::from_parts(CredentialStore::new(accounts), secret)
    }

    pub fn from_parts(credentials: CredentialStore, secret: SigningSecret) -> Self {
        Self {
            credentials,
            issuer: TokenIssuer::new(secret.clone()),
            verifier: TokenVerifier::new(secret),
        }
    }

    /// Create an account. Password rules are checked by the caller.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountId, AuthError> {
        self.credentials
            .create_account(full_name, email, password)
            .await
    }

    /// Verify credentials and mint a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let account_id = self.credentials.verify_credentials(email, password).await?;
        let token = self.issuer.issue(&account_id)?;

        tracing::info!(account_id = %account_id, "Account logged in");

        Ok(token)
    }

    /// Swap a valid token for one with a fresh expiry
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, AuthError> {
        let token = self.issuer.refresh(token)?;
        Ok(token)
    }

    /// Get an account by ID
    pub async fn get_account(&self, id: &AccountId) -> Result<Account, AuthError> {
        self.credentials.get_account(id).await
    }

    /// Token verifier (for the request authenticator)
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }
}
