//! Entry record.
//!
//! # Responsibility
//! - Map the `entries[]` item shape of a backup document.
//! - Expose the normalized calendar day used for grouping.
//!
//! # Invariants
//! - `value` keeps its JSON number representation (integer vs float).
//! - Integer values compare exactly; floats only when either side is one.
//! - A wrong-typed optional field reads as its default and is written back
//!   unchanged.
//! - `day()` is the first 10 characters of `date`, or the whole string when
//!   shorter. No padding is applied.

use super::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// Number of leading `date` characters that identify a calendar day.
pub const DAY_KEY_CHARS: usize = 10;

/// One dated record from the `entries` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    /// Not required to reference an existing habit.
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub habit_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub date: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub value: Field<Number>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub created_at: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Creates an entry with every optional field set.
    pub fn new(
        id: impl Into<String>,
        habit_id: impl Into<String>,
        date: impl Into<String>,
        value: impl Into<Number>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            habit_id: Field::Present(habit_id.into()),
            date: Field::Present(date.into()),
            value: Field::Present(value.into()),
            created_at: Field::Present(created_at.into()),
            extra: Map::new(),
        }
    }

    /// Whether this entry is logged against `habit_id`.
    pub fn belongs_to(&self, habit_id: &str) -> bool {
        self.habit_id.as_deref() == Some(habit_id)
    }

    /// Raw date string, empty when absent.
    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Calendar-day portion of `date`.
    pub fn day(&self) -> &str {
        leading_chars(self.date(), DAY_KEY_CHARS)
    }

    /// Recorded value, 0 when absent.
    pub fn value(&self) -> Number {
        self.value.get().cloned().unwrap_or_else(|| Number::from(0))
    }

    /// Recorded value as a float, for display.
    pub fn value_f64(&self) -> f64 {
        self.value.get().and_then(Number::as_f64).unwrap_or(0.0)
    }

    /// Orders two entries by value, missing values counting as 0.
    pub fn cmp_value(&self, other: &Entry) -> Ordering {
        compare_numbers(&self.value(), &other.value())
    }

    /// Creation timestamp, empty when absent.
    pub fn created_at(&self) -> &str {
        self.created_at.as_deref().unwrap_or("")
    }

    /// Calendar-day portion of `createdAt`.
    pub fn created_day(&self) -> &str {
        leading_chars(self.created_at(), DAY_KEY_CHARS)
    }
}

/// Compares JSON numbers without losing precision on large integers.
pub fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return left.cmp(&right);
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return left.cmp(&right);
    }
    // Mixed signs outside i64 range: a u64 above i64::MAX beats any i64.
    match (left.is_f64() || right.is_f64(), left.is_u64(), right.is_u64()) {
        (false, true, false) => Ordering::Greater,
        (false, false, true) => Ordering::Less,
        _ => {
            let left = left.as_f64().unwrap_or(0.0);
            let right = right.as_f64().unwrap_or(0.0);
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        }
    }
}

/// Returns the first `count` characters of `value` without splitting a
/// multi-byte character.
pub fn leading_chars(value: &str, count: usize) -> &str {
    match value.char_indices().nth(count) {
        Some((byte_index, _)) => &value[..byte_index],
        None => value,
    }
}
