//! API handlers for the habit server

pub mod auth;
pub mod habit;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::{database_health, DatabaseHealth};
use crate::state::AppState;

pub use crate::middleware::auth::AuthenticatedAccount;

pub async fn root() -> &'static str {
    "Habit Tracker API"
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: DatabaseHealth,
    pub version: &'static str,
}

/// GET /health
///
/// 503 when a configured database cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = database_health(state.db_pool.as_ref()).await;

    let (code, status) = match database {
        DatabaseHealth::Unreachable => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
        _ => (StatusCode::OK, "healthy"),
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
