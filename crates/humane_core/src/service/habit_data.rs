//! Read-only query service over one loaded snapshot.
//!
//! # Responsibility
//! - Index habits by id for name/category lookups.
//! - Provide grouping, filtering, statistics and name search for the CLI.
//!
//! # Invariants
//! - The held snapshot is never mutated.
//! - Duplicate habit ids resolve to the last habit in document order.
//! - Grouped and filtered results keep document order unless stated otherwise.

use crate::backup::{load_snapshot, BackupSource, LoadError, LoadResult};
use crate::model::entry::Entry;
use crate::model::habit::{Habit, UNKNOWN_HABIT_NAME};
use crate::model::snapshot::Snapshot;
use crate::service::merge_service::merge_habits;
use std::collections::HashMap;
use std::path::Path;

/// Habits sharing one category, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub habits: Vec<&'a Habit>,
}

/// Aggregate numbers for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStat {
    pub category: String,
    pub habit_count: usize,
    /// Sum of `targetPerWeek`, missing targets counted as 0. Saturates at
    /// `u64::MAX`.
    pub total_target: u64,
}

impl CategoryStat {
    pub fn new(category: impl Into<String>, habit_count: usize, total_target: u64) -> Self {
        Self {
            category: category.into(),
            habit_count,
            total_target,
        }
    }
}

/// Snapshot-backed query object.
#[derive(Debug, Clone)]
pub struct HabitData {
    snapshot: Snapshot,
    index: HashMap<String, usize>,
}

impl HabitData {
    /// Wraps an in-memory snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        let index = snapshot
            .habits
            .iter()
            .enumerate()
            .map(|(position, habit)| (habit.id.clone(), position))
            .collect();
        Self { snapshot, index }
    }

    /// Loads a backup file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        Ok(Self::new(load_snapshot(path)?))
    }

    /// Loads from whichever source is provided.
    ///
    /// # Errors
    /// - [`LoadError::NoSource`] when `source` is `None`.
    /// - Any error raised while reading the source.
    pub fn load(source: Option<BackupSource>) -> LoadResult<Self> {
        let source = source.ok_or(LoadError::NoSource)?;
        Ok(Self::new(source.into_snapshot()?))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn habits(&self) -> &[Habit] {
        &self.snapshot.habits
    }

    pub fn entries(&self) -> &[Entry] {
        &self.snapshot.entries
    }

    /// Looks up a habit through the id index.
    pub fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.index
            .get(habit_id)
            .map(|&position| &self.snapshot.habits[position])
    }

    /// Groups habits by category, in first-appearance order.
    pub fn categories(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        let mut slot_by_category: HashMap<&str, usize> = HashMap::new();

        for habit in &self.snapshot.habits {
            let category = habit.category();
            match slot_by_category.get(category) {
                Some(&slot) => groups[slot].habits.push(habit),
                None => {
                    slot_by_category.insert(category, groups.len());
                    groups.push(CategoryGroup {
                        category,
                        habits: vec![habit],
                    });
                }
            }
        }

        groups
    }

    /// Habits whose category equals `category` exactly.
    pub fn habits_in_category(&self, category: &str) -> Vec<&Habit> {
        self.snapshot
            .habits
            .iter()
            .filter(|habit| habit.category() == category)
            .collect()
    }

    /// Entries logged against `habit_id`, in document order.
    pub fn entries_for_habit(&self, habit_id: &str) -> Vec<&Entry> {
        self.snapshot
            .entries
            .iter()
            .filter(|entry| entry.belongs_to(habit_id))
            .collect()
    }

    pub fn entry_count(&self, habit_id: &str) -> usize {
        self.snapshot
            .entries
            .iter()
            .filter(|entry| entry.belongs_to(habit_id))
            .count()
    }

    /// Habit display name, `"Unknown"` for ids that are not indexed.
    pub fn habit_name(&self, habit_id: &str) -> &str {
        self.habit(habit_id)
            .map(Habit::name)
            .unwrap_or(UNKNOWN_HABIT_NAME)
    }

    /// Per-category habit counts and weekly target sums, sorted by name.
    pub fn category_stats(&self) -> Vec<CategoryStat> {
        let mut stats: Vec<CategoryStat> = self
            .categories()
            .into_iter()
            .map(|group| CategoryStat {
                category: group.category.to_string(),
                habit_count: group.habits.len(),
                total_target: group
                    .habits
                    .iter()
                    .fold(0u64, |total, habit| total.saturating_add(habit.target_per_week())),
            })
            .collect();
        stats.sort_by(|left, right| left.category.cmp(&right.category));
        stats
    }

    /// Case-insensitive substring search on habit names.
    ///
    /// An empty pattern matches every habit. Unnamed habits only match the
    /// empty pattern.
    pub fn find_by_name(&self, pattern: &str) -> Vec<&Habit> {
        let needle = pattern.to_lowercase();
        self.snapshot
            .habits
            .iter()
            .filter(|habit| {
                let name = habit.name.as_deref().unwrap_or("");
                name.to_lowercase().contains(needle.as_str())
            })
            .collect()
    }

    /// Merges `source_ids` into `target_id` over the held snapshot.
    pub fn merge<I, S>(&self, target_id: &str, source_ids: I) -> Snapshot
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        merge_habits(&self.snapshot, target_id, source_ids)
    }
}
