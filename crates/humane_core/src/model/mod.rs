//! Typed backup document model.
//!
//! # Responsibility
//! - Define the habit, entry and snapshot records read from a backup file.
//! - Own the default-substitution policy for optional fields.
//!
//! # Invariants
//! - Optional fields are re-emitted as read: absent, `null`, or the raw
//!   value even when it has the wrong type.
//! - Unknown fields are carried through unchanged.

pub mod entry;
pub mod field;
pub mod habit;
pub mod snapshot;
