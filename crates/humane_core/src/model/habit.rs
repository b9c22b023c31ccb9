//! Habit record.
//!
//! # Responsibility
//! - Map the `habits[]` item shape of a backup document.
//! - Resolve `category`/`targetPerWeek`/`name` defaults in one place.
//!
//! # Invariants
//! - `id` is required; every other field is optional.
//! - A wrong-typed optional field reads as its default and is written back
//!   unchanged.
//! - Defaults are applied on read, never written back into the record.

use super::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque habit identifier as stored in the backup.
pub type HabitId = String;

/// Category used for habits that do not declare one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Name reported for unknown or unnamed habits.
pub const UNKNOWN_HABIT_NAME: &str = "Unknown";

/// One tracked habit from the `habits` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub category: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub target_per_week: Field<u64>,
    /// Fields this tool does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Habit {
    /// Creates a habit with only an id and a display name.
    pub fn new(id: impl Into<HabitId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Field::Present(name.into()),
            category: Field::Missing,
            target_per_week: Field::Missing,
            extra: Map::new(),
        }
    }

    /// Builder-style category setter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Field::Present(category.into());
        self
    }

    /// Builder-style weekly target setter.
    pub fn with_target(mut self, target_per_week: u64) -> Self {
        self.target_per_week = Field::Present(target_per_week);
        self
    }

    /// Display name, `"Unknown"` when absent or not a string.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_HABIT_NAME)
    }

    /// Category, `"uncategorized"` when absent.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Weekly target, 0 when absent or not a non-negative integer.
    pub fn target_per_week(&self) -> u64 {
        self.target_per_week.get().copied().unwrap_or(0)
    }
}
