//! Habit tracking
//!
//! Plain data access behind one rule: every call is scoped to the
//! authenticated owner, and someone else's habit looks exactly like a
//! missing one.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AccountId, Habit, HabitFilter, HabitInput, HabitLog};
use crate::store::{HabitStore, StoreError};

/// Habit service errors
#[derive(Error, Debug)]
pub enum HabitError {
    #[error("Habit not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for HabitError {
    fn from(e: StoreError) -> Self {
        HabitError::DatabaseError(e.to_string())
    }
}

#[derive(Clone)]
pub struct HabitService {
    store: Arc<dyn HabitStore>,
}

impl HabitService {
    pub fn new(store: Arc<dyn HabitStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner: &AccountId, input: HabitInput) -> Result<Habit, HabitError> {
        let habit = Habit {
            id: Uuid::new_v4(),
            owner_id: owner.clone(),
            name: input.name,
            category: input.category,
            preferred_hour: input.preferred_hour,
            frequency: input.frequency,
            created_at: Utc::now(),
        };

        self.store.insert_habit(&habit).await?;
        tracing::debug!(habit_id = %habit.id, owner = %owner, "Habit created");

        Ok(habit)
    }

    pub async fn list(
        &self,
        owner: &AccountId,
        filter: &HabitFilter,
    ) -> Result<Vec<Habit>, HabitError> {
        Ok(self.store.list_habits(owner, filter).await?)
    }

    pub async fn update(
        &self,
        owner: &AccountId,
        id: Uuid,
        input: &HabitInput,
    ) -> Result<Habit, HabitError> {
        self.store
            .update_habit(owner, id, input)
            .await?
            .ok_or(HabitError::NotFound)
    }

    pub async fn delete(&self, owner: &AccountId, id: Uuid) -> Result<(), HabitError> {
        if self.store.delete_habit(owner, id).await? {
            Ok(())
        } else {
            Err(HabitError::NotFound)
        }
    }

    /// Record one completion of an owned habit
    pub async fn complete(&self, owner: &AccountId, id: Uuid) -> Result<HabitLog, HabitError> {
        let habit = self
            .store
            .find_habit(owner, id)
            .await?
            .ok_or(HabitError::NotFound)?;

        let log = HabitLog {
            id: Uuid::new_v4(),
            habit_id: habit.id,
            completed_at: Utc::now(),
        };
        self.store.insert_log(&log).await?;

        Ok(log)
    }

    /// Completion history of an owned habit, newest first
    pub async fn history(&self, owner: &AccountId, id: Uuid) -> Result<Vec<HabitLog>, HabitError> {
        let habit = self
            .store
            .find_habit(owner, id)
            .await?
            .ok_or(HabitError::NotFound)?;

        Ok(self.store.list_logs(habit.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;
    use crate::store::{AccountStore, MemoryStore};

    async fn setup() -> (HabitService, AccountId, AccountId) {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for email in ["owner@x.com", "other@x.com"] {
            let account = Account {
                id: AccountId::generate(),
                full_name: "Test".to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                created_at: Utc::now(),
            };
            store.insert_account(&account).await.unwrap();
            ids.push(account.id);
        }
        let other = ids.pop().unwrap();
        let owner = ids.pop().unwrap();
        (HabitService::new(Arc::new(store)), owner, other)
    }

    fn input(name: &str) -> HabitInput {
        HabitInput {
            name: name.to_string(),
            category: "Health".to_string(),
            preferred_hour: "08:00".to_string(),
            frequency: 3,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let (habits, owner, _) = setup().await;
        let habit = habits.create(&owner, input("Drink water")).await.unwrap();

        let updated = habits
            .update(&owner, habit.id, &input("Drink more water"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Drink more water");
        assert_eq!(updated.created_at, habit.created_at);

        habits.delete(&owner, habit.id).await.unwrap();
        assert!(matches!(
            habits.delete(&owner, habit.id).await,
            Err(HabitError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let (habits, owner, other) = setup().await;
        let habit = habits.create(&owner, input("Run")).await.unwrap();

        assert!(matches!(
            habits.update(&other, habit.id, &input("Hijacked")).await,
            Err(HabitError::NotFound)
        ));
        assert!(matches!(
            habits.complete(&other, habit.id).await,
            Err(HabitError::NotFound)
        ));
        assert!(matches!(
            habits.history(&other, habit.id).await,
            Err(HabitError::NotFound)
        ));
        assert!(matches!(
            habits.delete(&other, habit.id).await,
            Err(HabitError::NotFound)
        ));
        assert!(habits
            .list(&other, &HabitFilter::default())
            .await
            .unwrap()
            .is_empty());

        // Untouched for the real owner
        let mine = habits.list(&owner, &HabitFilter::default()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Run");
    }

    #[tokio::test]
    async fn test_complete_and_history() {
        let (habits, owner, _) = setup().await;
        let habit = habits.create(&owner, input("Stretch")).await.unwrap();

        let first = habits.complete(&owner, habit.id).await.unwrap();
        let second = habits.complete(&owner, habit.id).await.unwrap();

        let history = habits.history(&owner, habit.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().any(|log| log.id == first.id));
        assert!(history.iter().any(|log| log.id == second.id));
        assert!(history[0].completed_at >= history[1].completed_at);
    }
}
