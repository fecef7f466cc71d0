//! Authentication module
//!
//! Provides password-based authentication with stateless session tokens.
//! - bcrypt credential storage and verification
//! - HS256 JWT issuance, refresh and verification

mod credentials;
mod error;
mod jwt;
mod password;
mod service;

pub use credentials::CredentialStore;
pub use error::AuthError;
pub use jwt::{Claims, IssuedToken, TokenError, TokenIssuer, TokenVerifier, TOKEN_TTL_HOURS};
pub use password::{hash_password, verify_password, MAX_PASSWORD_BYTES};
pub use service::AuthService;
