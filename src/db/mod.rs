//! PostgreSQL pool setup, migrations and liveness probe

use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to run migrations: {0}")]
    MigrationError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Database status as reported by `GET /health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseHealth {
    Connected,
    Unreachable,
    /// Running on the in-memory store
    NotConfigured,
}

pub async fn create_pool(config: &Config) -> Result<PgPool, DbError> {
    tracing::info!(url = %config.database_url_masked(), "Connecting to database");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Apply pending migrations from `./migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    tracing::info!("Database migrations applied");

    Ok(())
}

pub async fn check_health(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(())
}

/// Probe the pool if there is one
pub async fn database_health(pool: Option<&PgPool>) -> DatabaseHealth {
    let Some(pool) = pool else {
        return DatabaseHealth::NotConfigured;
    };

    match check_health(pool).await {
        Ok(()) => DatabaseHealth::Connected,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            DatabaseHealth::Unreachable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_pool_is_not_configured() {
        assert_eq!(database_health(None).await, DatabaseHealth::NotConfigured);
    }

    #[test]
    fn test_health_serializes_snake_case() {
        let json = serde_json::to_string(&DatabaseHealth::NotConfigured).unwrap();
        assert_eq!(json, "\"not_configured\"");
    }
}
