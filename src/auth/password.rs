//! Password hashing
//!
//! bcrypt is deliberately slow, so both directions run on the blocking pool.
//! `bcrypt::verify` compares digests in constant time.

use super::error::AuthError;

/// bcrypt reads at most this many bytes of input and silently drops the rest
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a raw password with the given bcrypt cost
///
/// Passwords longer than `MAX_PASSWORD_BYTES` are refused rather than
/// truncated.
pub async fn hash_password(raw: &str, cost: u32) -> Result<String, AuthError> {
    if raw.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::PasswordTooLong);
    }

    let raw = raw.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost)).await??;
    Ok(hash)
}

/// Check a raw password against a stored hash
///
/// A stored hash that cannot be parsed counts as a mismatch, and so does a
/// password too long to have been hashed.
pub async fn verify_password(raw: &str, hash: &str) -> Result<bool, AuthError> {
    if raw.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    let raw = raw.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(raw, &hash)).await?;

    match matches {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is unreadable");
            Ok(false)
        }
    }
}
