//! Middleware for the habit API
//!
//! This module provides middleware for request tracing, security headers,
//! and authentication.

pub mod auth;
mod security;
mod trace;

pub use auth::{authenticate, bearer_token, AuthenticatedAccount, BEARER_PREFIX};
pub use security::{hsts_header, security_headers};
pub use trace::request_tracing;
