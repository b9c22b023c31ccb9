//! Optional record field that survives bad input.
//!
//! # Responsibility
//! - Tell apart an absent key, an explicit `null`, a well-typed value and a
//!   value of the wrong type.
//! - Re-emit each of those exactly as it was read.
//!
//! # Invariants
//! - Decoding a field never fails; a wrong-typed value is kept raw.
//! - Only `Present` is visible through `get()`; callers apply defaults for
//!   the rest.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One optional field of a habit or entry.
///
/// Use with `#[serde(default, skip_serializing_if = "Field::is_missing")]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Key not present in the record.
    Missing,
    /// Key present with an explicit `null`.
    Null,
    Present(T),
    /// Key present with a value that does not decode as `T`.
    Malformed(Value),
}

impl<T> Field<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl Field<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.get().map(String::as_str)
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing | Self::Null => serializer.serialize_unit(),
            Self::Present(value) => value.serialize(serializer),
            Self::Malformed(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Self::Null);
        }
        Ok(match T::deserialize(&raw) {
            Ok(value) => Self::Present(value),
            Err(_) => Self::Malformed(raw),
        })
    }
}
