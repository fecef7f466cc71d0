//! PostgreSQL store tests
//!
//! Run with `TEST_DATABASE_URL` pointing at a scratch database and
//! `cargo test -- --ignored`.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use habit_server::auth::{AuthError, CredentialStore};
use habit_server::models::{Account, AccountId, HabitFilter, HabitInput};
use habit_server::habits::HabitService;
use habit_server::store::{AccountStore, PgStore, StoreError};

async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/habits_test".to_string());

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    habit_server::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.local", uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_duplicate_email_hits_unique_constraint() {
    let store = PgStore::new(setup_test_db().await);
    let email = unique_email("dup");

    let account = |email: &str| Account {
        id: AccountId::generate(),
        full_name: "Dup".to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        created_at: Utc::now(),
    };

    store.insert_account(&account(&email)).await.unwrap();
    let err = store.insert_account(&account(&email)).await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_concurrent_registration_single_winner() {
    let store = Arc::new(PgStore::new(setup_test_db().await));
    let credentials = CredentialStore::with_hash_cost(store, 4);
    let email = unique_email("race");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let credentials = credentials.clone();
        let email = email.clone();
        handles.push(tokio::spawn(async move {
            credentials.create_account("Racer", &email, "secret1").await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AuthError::DuplicateEmail) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_habit_round_trip_scoped_to_owner() {
    let store = Arc::new(PgStore::new(setup_test_db().await));
    let credentials = CredentialStore::with_hash_cost(store.clone(), 4);
    let habits = HabitService::new(store);

    let owner = credentials
        .create_account("Owner", &unique_email("owner"), "secret1")
        .await
        .unwrap();
    let other = credentials
        .create_account("Other", &unique_email("other"), "secret1")
        .await
        .unwrap();

    let habit = habits
        .create(
            &owner,
            HabitInput {
                name: "Walk".to_string(),
                category: "Health".to_string(),
                preferred_hour: "07:00".to_string(),
                frequency: 5,
            },
        )
        .await
        .unwrap();

    let filter = HabitFilter {
        category: Some("Health".to_string()),
        frequency: Some(5),
    };
    let found = habits.list(&owner, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, habit.id);

    assert!(habits.list(&other, &filter).await.unwrap().is_empty());
    assert!(habits.complete(&other, habit.id).await.is_err());

    habits.complete(&owner, habit.id).await.unwrap();
    assert_eq!(habits.history(&owner, habit.id).await.unwrap().len(), 1);
}
