//! JWT token generation and validation
//!
//! Tokens are stateless HS256 JWTs carrying only the subject (`user_id`) and an
//! expiry (`exp`). There is no server-side session; expiry is the only way a
//! token stops being valid.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SigningSecret;
use crate::models::AccountId;

/// Lifetime of every issued token
pub const TOKEN_TTL_HOURS: i64 = 24;

/// The only accepted signing algorithm
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token verification and issuance errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has no expiry")]
    MissingExpiry,

    #[error("Token expired")]
    Expired,

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account ID)
    #[serde(rename = "user_id")]
    pub sub: String,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Claims as found on the wire, before we trust their shape
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    user_id: Option<serde_json::Value>,
    #[serde(default)]
    exp: Option<serde_json::Value>,
}

/// A freshly minted token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Validates presented tokens and extracts the subject
#[derive(Clone)]
pub struct TokenVerifier {
    secret: SigningSecret,
}

impl TokenVerifier {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    ///
    /// Checks, in order: structure and algorithm, signature, presence of
    /// `exp`, `now < exp`, presence of a subject.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccountId, TokenError> {
        let header =
            decode_header(token).map_err(|e| TokenError::MalformedToken(e.to_string()))?;

        // Reject anything that is not our HMAC scheme before touching the key
        if header.alg != ALGORITHM {
            return Err(TokenError::MalformedToken(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let data = decode::<RawClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::MalformedToken(e.to_string()),
        })?;

        let exp = data
            .claims
            .exp
            .as_ref()
            .and_then(numeric_timestamp)
            .ok_or(TokenError::MissingExpiry)?;

        if now.timestamp() >= exp {
            return Err(TokenError::Expired);
        }

        data.claims
            .user_id
            .as_ref()
            .and_then(|v| v.as_str())
            .and_then(AccountId::parse)
            .ok_or(TokenError::MissingSubject)
    }
}

/// `exp` may arrive as an integer or a float; anything else is no expiry
fn numeric_timestamp(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
}

/// Mints signed, time-bounded tokens
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SigningSecret,
    ttl: Duration,
    verifier: TokenVerifier,
}

impl TokenIssuer {
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            verifier: TokenVerifier::new(secret.clone()),
            secret,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issue a token for `subject`, valid for 24 hours from now
    pub fn issue(&self, subject: &AccountId) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let exp = (now + self.ttl).timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };

        let token = encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let expires_at = Utc
            .timestamp_opt(exp, 0)
            .single()
            .ok_or_else(|| TokenError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Exchange a still-valid token for a new one with a fresh expiry.
    /// Expired tokens cannot be refreshed.
    pub fn refresh(&self, existing: &str) -> Result<IssuedToken, TokenError> {
        self.refresh_at(existing, Utc::now())
    }

    pub fn refresh_at(
        &self,
        existing: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let subject = self.verifier.verify_at(existing, now)?;
        self.issue_at(&subject, now)
    }
}
