//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AccountStore, HabitStore, StoreError};
use crate::models::{Account, AccountId, Habit, HabitFilter, HabitInput, HabitLog};

/// Store over a PostgreSQL pool. Email uniqueness rests on the
/// `accounts_email_key` constraint.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, full_name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&account.id)
        .bind(&account.full_name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl HabitStore for PgStore {
    async fn insert_habit(&self, habit: &Habit) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO habits (id, owner_id, name, category, preferred_hour, frequency, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(habit.id)
        .bind(&habit.owner_id)
        .bind(&habit.name)
        .bind(&habit.category)
        .bind(&habit.preferred_hour)
        .bind(habit.frequency)
        .bind(habit.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_habits(
        &self,
        owner: &AccountId,
        filter: &HabitFilter,
    ) -> Result<Vec<Habit>, StoreError> {
        let habits = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, category, preferred_hour, frequency, created_at
            FROM habits
            WHERE owner_id = $1
              AND ($2::TEXT IS NULL OR category = $2)
              AND ($3::INT4 IS NULL OR frequency = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .bind(filter.category.as_deref())
        .bind(filter.frequency)
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    async fn find_habit(&self, owner: &AccountId, id: Uuid) -> Result<Option<Habit>, StoreError> {
        let habit = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, category, preferred_hour, frequency, created_at
            FROM habits
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(habit)
    }

    async fn update_habit(
        &self,
        owner: &AccountId,
        id: Uuid,
        input: &HabitInput,
    ) -> Result<Option<Habit>, StoreError> {
        let habit = sqlx::query_as(
            r#"
            UPDATE habits
            SET name = $3, category = $4, preferred_hour = $5, frequency = $6
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, name, category, preferred_hour, frequency, created_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.preferred_hour)
        .bind(input.frequency)
        .fetch_optional(&self.pool)
        .await?;

        Ok(habit)
    }

    async fn delete_habit(&self, owner: &AccountId, id: Uuid) -> Result<bool, StoreError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM habits WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn insert_log(&self, log: &HabitLog) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO habit_logs (id, habit_id, completed_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(log.id)
        .bind(log.habit_id)
        .bind(log.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_logs(&self, habit_id: Uuid) -> Result<Vec<HabitLog>, StoreError> {
        let logs = sqlx::query_as(
            r#"
            SELECT id, habit_id, completed_at
            FROM habit_logs
            WHERE habit_id = $1
            ORDER BY completed_at DESC
            "#,
        )
        .bind(habit_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
