//! Habit request models

use serde::Deserialize;
use validator::Validate;

/// Body for creating or replacing a habit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HabitInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub preferred_hour: String,
    #[serde(default)]
    pub frequency: i32,
}

/// Query filters for listing habits; unset fields match everything
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitFilter {
    pub category: Option<String>,
    pub frequency: Option<i32>,
}

impl HabitFilter {
    pub fn matches(&self, category: &str, frequency: i32) -> bool {
        self.category.as_deref().map_or(true, |c| c == category)
            && self.frequency.map_or(true, |f| f == frequency)
    }
}
