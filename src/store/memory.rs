//! In-process store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{AccountStore, HabitStore, StoreError};
use crate::models::{Account, AccountId, Habit, HabitFilter, HabitInput, HabitLog};

#[derive(Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    emails: HashMap<String, AccountId>,
    habits: HashMap<Uuid, Habit>,
    logs: Vec<HabitLog>,
}

/// Store kept in memory behind one lock, so check-and-insert is atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .emails
            .get(email)
            .and_then(|id| tables.accounts.get(id))
            .cloned())
    }

    async fn find_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.tables.lock().await.accounts.get(id).cloned())
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.emails.contains_key(&account.email) {
            return Err(StoreError::UniqueViolation("accounts_email_key".to_string()));
        }
        if tables.accounts.contains_key(&account.id) {
            return Err(StoreError::UniqueViolation("accounts_pkey".to_string()));
        }
        tables
            .emails
            .insert(account.email.clone(), account.id.clone());
        tables.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }
}

#[async_trait]
impl HabitStore for MemoryStore {
    async fn insert_habit(&self, habit: &Habit) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.accounts.contains_key(&habit.owner_id) {
            return Err(StoreError::Database(
                "habits_owner_id_fkey violated".to_string(),
            ));
        }
        tables.habits.insert(habit.id, habit.clone());
        Ok(())
    }

    async fn list_habits(
        &self,
        owner: &AccountId,
        filter: &HabitFilter,
    ) -> Result<Vec<Habit>, StoreError> {
        let tables = self.tables.lock().await;
        let mut habits: Vec<Habit> = tables
            .habits
            .values()
            .filter(|h| &h.owner_id == owner && filter.matches(&h.category, h.frequency))
            .cloned()
            .collect();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(habits)
    }

    async fn find_habit(&self, owner: &AccountId, id: Uuid) -> Result<Option<Habit>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .habits
            .get(&id)
            .filter(|h| &h.owner_id == owner)
            .cloned())
    }

    async fn update_habit(
        &self,
        owner: &AccountId,
        id: Uuid,
        input: &HabitInput,
    ) -> Result<Option<Habit>, StoreError> {
        let mut tables = self.tables.lock().await;
        let Some(habit) = tables.habits.get_mut(&id).filter(|h| &h.owner_id == owner) else {
            return Ok(None);
        };
        habit.name = input.name.clone();
        habit.category = input.category.clone();
        habit.preferred_hour = input.preferred_hour.clone();
        habit.frequency = input.frequency;
        Ok(Some(habit.clone()))
    }

    async fn delete_habit(&self, owner: &AccountId, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        let owned = tables
            .habits
            .get(&id)
            .map_or(false, |h| &h.owner_id == owner);
        if !owned {
            return Ok(false);
        }
        tables.habits.remove(&id);
        tables.logs.retain(|log| log.habit_id != id);
        Ok(true)
    }

    async fn insert_log(&self, log: &HabitLog) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.habits.contains_key(&log.habit_id) {
            return Err(StoreError::Database(
                "habit_logs_habit_id_fkey violated".to_string(),
            ));
        }
        tables.logs.push(log.clone());
        Ok(())
    }

    async fn list_logs(&self, habit_id: Uuid) -> Result<Vec<HabitLog>, StoreError> {
        let tables = self.tables.lock().await;
        let mut logs: Vec<HabitLog> = tables
            .logs
            .iter()
            .filter(|log| log.habit_id == habit_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(logs)
    }
}
