//! Core domain logic for the Humane Tracker backup tool.
//! Loading, querying and merging habit backups live here; the CLI only
//! renders and persists what this crate returns.

pub mod backup;
pub mod logging;
pub mod model;
pub mod service;

pub use backup::{
    default_backup_dir, find_latest_backup, load_snapshot, parse_snapshot, snapshot_from_value,
    BackupSource, LoadError, LoadResult,
};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status, LoggingError};
pub use model::entry::Entry;
pub use model::field::Field;
pub use model::habit::{Habit, HabitId, DEFAULT_CATEGORY, UNKNOWN_HABIT_NAME};
pub use model::snapshot::{Snapshot, SnapshotError};
pub use service::habit_data::{CategoryGroup, CategoryStat, HabitData};
pub use service::merge_service::{merge_habits, MergePlan};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
