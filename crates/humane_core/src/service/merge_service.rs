//! Habit merge engine.
//!
//! # Responsibility
//! - Fold the entries of several source habits into one target habit.
//! - Collapse same-day entries to the one with the highest value.
//!
//! # Invariants
//! - The input snapshot is never mutated; a new snapshot is returned.
//! - The target id is never part of the effective source set.
//! - No merged entry keeps a source habit id as `habitId`.
//! - Entries of unrelated habits are copied through unchanged and in order.
//! - On equal values the first entry seen for that day wins.
//! - Integer values are compared exactly, never through `f64`.

use crate::model::entry::Entry;
use crate::model::field::Field;
use crate::model::habit::Habit;
use crate::model::snapshot::Snapshot;
use log::info;
use serde_json::Map;
use std::collections::{BTreeSet, HashMap};

/// Normalized target/source selection for one merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    target_id: String,
    sources: BTreeSet<String>,
}

impl MergePlan {
    /// Builds a plan, dropping the target from the source set if present.
    pub fn new<I, S>(target_id: impl Into<String>, source_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target_id = target_id.into();
        let sources = source_ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &String| *id != target_id)
            .collect();
        Self { target_id, sources }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Source ids with the target removed.
    pub fn effective_sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    /// Whether a habit id takes part in this merge (target or source).
    pub fn involves(&self, habit_id: &str) -> bool {
        habit_id == self.target_id || self.sources.contains(habit_id)
    }

    fn contributes(&self, entry: &Entry) -> bool {
        entry
            .habit_id
            .as_deref()
            .is_some_and(|habit_id| self.involves(habit_id))
    }

    /// Applies this plan to `snapshot` and returns the merged snapshot.
    pub fn apply(&self, snapshot: &Snapshot) -> Snapshot {
        let mut untouched = Vec::with_capacity(snapshot.entries.len());
        let mut winners: Vec<(&str, &Entry)> = Vec::new();
        let mut slot_by_day: HashMap<&str, usize> = HashMap::new();
        let mut contributing = 0usize;

        for entry in &snapshot.entries {
            if !self.contributes(entry) {
                untouched.push(entry.clone());
                continue;
            }
            contributing += 1;

            let day = entry.day();
            match slot_by_day.get(day) {
                Some(&slot) => {
                    if entry.cmp_value(winners[slot].1).is_gt() {
                        winners[slot].1 = entry;
                    }
                }
                None => {
                    slot_by_day.insert(day, winners.len());
                    winners.push((day, entry));
                }
            }
        }

        let merged_count = winners.len();
        let mut entries = untouched;
        entries.extend(
            winners
                .into_iter()
                .map(|(day, winner)| self.merged_entry(day, winner)),
        );

        let habits: Vec<Habit> = snapshot
            .habits
            .iter()
            .filter(|habit| !self.sources.contains(&habit.id))
            .cloned()
            .collect();

        info!(
            "event=merge module=merge status=ok sources={} removed={} contributing={} merged={}",
            self.sources.len(),
            snapshot.habits.len() - habits.len(),
            contributing,
            merged_count
        );

        snapshot.with_records(habits, entries)
    }

    fn merged_entry(&self, day: &str, winner: &Entry) -> Entry {
        Entry {
            id: winner.id.clone(),
            habit_id: Field::Present(self.target_id.clone()),
            date: Field::Present(day.to_string()),
            value: Field::Present(winner.value()),
            created_at: Field::Present(winner.created_at().to_string()),
            extra: Map::new(),
        }
    }
}

/// Merges `source_ids` into `target_id`, keeping the max value per day.
///
/// A target that does not exist is not an error: the merged entries are
/// attributed to that id anyway.
pub fn merge_habits<I, S>(snapshot: &Snapshot, target_id: &str, source_ids: I) -> Snapshot
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MergePlan::new(target_id, source_ids).apply(snapshot)
}
