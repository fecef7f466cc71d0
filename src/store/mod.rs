//! Persistence seams for accounts and habits
//!
//! Services talk to these traits; `PgStore` backs them with PostgreSQL and
//! `MemoryStore` keeps everything in process for tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Account, AccountId, Habit, HabitFilter, HabitInput, HabitLog};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation(
                    db_err
                        .constraint()
                        .unwrap_or("unique constraint")
                        .to_string(),
                )
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Account persistence
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Exact, case-sensitive email lookup
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. Must fail with `UniqueViolation` if the email is
    /// taken, even when two inserts race.
    async fn insert_account(&self, account: &Account) -> Result<(), StoreError>;
}

/// Habit persistence. Every habit query is scoped by owner.
#[async_trait]
pub trait HabitStore: Send + Sync + 'static {
    async fn insert_habit(&self, habit: &Habit) -> Result<(), StoreError>;

    /// Owner's habits matching `filter`, newest first
    async fn list_habits(
        &self,
        owner: &AccountId,
        filter: &HabitFilter,
    ) -> Result<Vec<Habit>, StoreError>;

    async fn find_habit(&self, owner: &AccountId, id: Uuid) -> Result<Option<Habit>, StoreError>;

    /// Returns the updated habit, or `None` if the owner has no such habit
    async fn update_habit(
        &self,
        owner: &AccountId,
        id: Uuid,
        input: &HabitInput,
    ) -> Result<Option<Habit>, StoreError>;

    /// Returns whether a habit was removed. Its logs go with it.
    async fn delete_habit(&self, owner: &AccountId, id: Uuid) -> Result<bool, StoreError>;

    async fn insert_log(&self, log: &HabitLog) -> Result<(), StoreError>;

    /// Logs of one habit, newest first
    async fn list_logs(&self, habit_id: Uuid) -> Result<Vec<HabitLog>, StoreError>;
}
