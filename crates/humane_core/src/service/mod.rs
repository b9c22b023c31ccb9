//! Core use-case services.
//!
//! # Responsibility
//! - Answer read-only queries over a loaded snapshot.
//! - Produce merged snapshots without touching the input.

pub mod habit_data;
pub mod merge_service;
