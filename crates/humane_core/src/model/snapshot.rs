//! Whole-document snapshot of a backup file.
//!
//! # Responsibility
//! - Hold typed `habits`/`entries` next to every other top-level field.
//! - Re-emit the document with untouched fields in their original position.
//!
//! # Invariants
//! - The root of a snapshot is always a JSON object.
//! - Top-level keys other than `habits`/`entries` are never interpreted.
//! - Serialization always writes both `habits` and `entries`.

use super::entry::Entry;
use super::habit::Habit;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const HABITS_KEY: &str = "habits";
pub const ENTRIES_KEY: &str = "entries";

/// Shape error raised when a document cannot be read as a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Document root is not a JSON object.
    NotAnObject,
    /// `habits` is present but is not an array of habit records with ids.
    InvalidHabits(serde_json::Error),
    /// `entries` is present but is not an array of entry records with ids.
    InvalidEntries(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "backup root must be a JSON object"),
            Self::InvalidHabits(err) => write!(f, "invalid `habits` array: {err}"),
            Self::InvalidEntries(err) => write!(f, "invalid `entries` array: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotAnObject => None,
            Self::InvalidHabits(err) | Self::InvalidEntries(err) => Some(err),
        }
    }
}

/// Backup document with typed habits and entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub entries: Vec<Entry>,
    /// Original top-level object. `habits`/`entries` keep their slot here as
    /// `null` placeholders so output order matches input order.
    document: Map<String, Value>,
}

impl Snapshot {
    /// Creates a snapshot with no passthrough fields.
    pub fn new(habits: Vec<Habit>, entries: Vec<Entry>) -> Self {
        Self {
            habits,
            entries,
            document: Map::new(),
        }
    }

    /// Parses a snapshot out of an already-decoded JSON document.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let Value::Object(mut document) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let habits: Vec<Habit> = match document.get_mut(HABITS_KEY) {
            Some(slot) => {
                serde_json::from_value(slot.take()).map_err(SnapshotError::InvalidHabits)?
            }
            None => Vec::new(),
        };
        let entries: Vec<Entry> = match document.get_mut(ENTRIES_KEY) {
            Some(slot) => {
                serde_json::from_value(slot.take()).map_err(SnapshotError::InvalidEntries)?
            }
            None => Vec::new(),
        };

        Ok(Self {
            habits,
            entries,
            document,
        })
    }

    /// Returns a copy of this snapshot with `habits`/`entries` replaced and
    /// every other top-level field kept.
    pub fn with_records(&self, habits: Vec<Habit>, entries: Vec<Entry>) -> Self {
        Self {
            habits,
            entries,
            document: self.document.clone(),
        }
    }

    /// Looks up a passthrough top-level field.
    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        if is_record_key(key) {
            return None;
        }
        self.document.get(key)
    }

    /// Iterates passthrough top-level fields in document order.
    pub fn extra_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.document
            .iter()
            .filter(|(key, _)| !is_record_key(key.as_str()))
    }

    /// Encodes this snapshot back into a JSON value.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Pretty-prints this snapshot with two-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn serialized_len(&self) -> usize {
        let missing_habits = usize::from(!self.document.contains_key(HABITS_KEY));
        let missing_entries = usize::from(!self.document.contains_key(ENTRIES_KEY));
        self.document.len() + missing_habits + missing_entries
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.serialized_len()))?;
        let mut wrote_habits = false;
        let mut wrote_entries = false;

        for (key, value) in &self.document {
            match key.as_str() {
                HABITS_KEY => {
                    map.serialize_entry(key, &self.habits)?;
                    wrote_habits = true;
                }
                ENTRIES_KEY => {
                    map.serialize_entry(key, &self.entries)?;
                    wrote_entries = true;
                }
                _ => map.serialize_entry(key, value)?,
            }
        }

        if !wrote_habits {
            map.serialize_entry(HABITS_KEY, &self.habits)?;
        }
        if !wrote_entries {
            map.serialize_entry(ENTRIES_KEY, &self.entries)?;
        }
        map.end()
    }
}

fn is_record_key(key: &str) -> bool {
    key == HABITS_KEY || key == ENTRIES_KEY
}

#[cfg(test)]
mod tests {
    use super::{Snapshot, SnapshotError};
    use serde_json::json;

    #[test]
    fn unknown_top_level_fields_keep_their_position() {
        let source = json!({
            "version": 1,
            "habits": [],
            "exportedAt": "2025-11-28T00:00:00Z",
            "entries": [],
            "settings": { "theme": "dark" }
        });
        let snapshot = Snapshot::from_value(source.clone()).unwrap();
        let encoded = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(encoded, serde_json::to_string(&source).unwrap());
    }

    #[test]
    fn missing_collections_are_empty_and_written_on_output() {
        let snapshot = Snapshot::from_value(json!({ "version": 2 })).unwrap();
        assert!(snapshot.habits.is_empty());
        assert!(snapshot.entries.is_empty());
        assert_eq!(
            snapshot.to_value().unwrap(),
            json!({ "version": 2, "habits": [], "entries": [] })
        );
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = Snapshot::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SnapshotError::NotAnObject));
    }

    #[test]
    fn record_keys_are_not_exposed_as_extra_fields() {
        let snapshot =
            Snapshot::from_value(json!({ "habits": [], "entries": [], "version": 1 })).unwrap();
        assert!(snapshot.extra_field("habits").is_none());
        let keys: Vec<&String> = snapshot.extra_fields().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["version"]);
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let snapshot = Snapshot::from_value(json!({ "habits": [] })).unwrap();
        let pretty = snapshot.to_pretty_json().unwrap();
        assert!(pretty.contains("\n  \"habits\": []"));
    }
}
