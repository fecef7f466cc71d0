//! Credential store
//!
//! Owns account creation and password verification. Uniqueness of email is
//! ultimately the storage layer's job; the lookup before insert only saves a
//! hash computation in the common case.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::error::AuthError;
use super::password::{hash_password, verify_password};
use crate::models::{Account, AccountId};
use crate::store::AccountStore;

/// Hashed when the email is unknown, so a miss costs about as much as a
/// wrong password.
const DUMMY_PASSWORD: &str = "habit-server-timing-equalizer";

#[derive(Clone)]
pub struct CredentialStore {
    accounts: Arc<dyn AccountStore>,
    hash_cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl CredentialStore {
    /// Credential store using bcrypt's default cost
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self::with_hash_cost(accounts, bcrypt::DEFAULT_COST)
    }

    pub fn with_hash_cost(accounts: Arc<dyn AccountStore>, hash_cost: u32) -> Self {
        Self {
            accounts,
            hash_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Create an account and return its identifier
    pub async fn create_account(
        &self,
        full_name: &str,
        email: &str,
        raw_password: &str,
    ) -> Result<AccountId, AuthError> {
        if self.accounts.find_account_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = hash_password(raw_password, self.hash_cost).await?;

        let account = Account {
            id: AccountId::generate(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        // A concurrent registration may have won since the lookup; the store
        // reports that as a unique violation, which maps to DuplicateEmail.
        self.accounts.insert_account(&account).await?;

        tracing::info!(account_id = %account.id, "Account created");

        Ok(account.id)
    }

    /// Check an email/password pair and return the matching account
    pub async fn verify_credentials(
        &self,
        email: &str,
        raw_password: &str,
    ) -> Result<AccountId, AuthError> {
        let Some(account) = self.accounts.find_account_by_email(email).await? else {
            let dummy = self
                .dummy_hash
                .get_or_try_init(|| hash_password(DUMMY_PASSWORD, self.hash_cost))
                .await?;
            verify_password(raw_password, dummy).await?;
            return Err(AuthError::AccountNotFound);
        };

        if !verify_password(raw_password, &account.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account.id)
    }

    /// Look an account up by identifier
    pub async fn get_account(&self, id: &AccountId) -> Result<Account, AuthError> {
        self.accounts
            .find_account_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }
}
