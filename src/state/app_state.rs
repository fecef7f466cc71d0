//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthService;
use crate::habits::HabitService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub habit_service: Arc<HabitService>,
    /// Present when running against PostgreSQL; used by the health check
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        habit_service: Arc<HabitService>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            auth_service,
            habit_service,
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<HabitService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.habit_service.clone()
    }
}
