//! Backup file loading and discovery.
//!
//! # Responsibility
//! - Read backup documents from disk or memory into a [`Snapshot`].
//! - Locate the newest backup file in a directory.
//!
//! # Invariants
//! - Loading is all-or-nothing: any failure yields a [`LoadError`] and no
//!   partial snapshot.
//! - Nothing in this module writes to disk.

use crate::model::snapshot::{Snapshot, SnapshotError};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod discover;
mod load;

pub use discover::{default_backup_dir, find_latest_backup, is_backup_file_name};
pub use load::{load_snapshot, parse_snapshot, snapshot_from_value};

pub type LoadResult<T> = Result<T, LoadError>;

/// Where a snapshot should be read from.
#[derive(Debug, Clone)]
pub enum BackupSource {
    /// Backup JSON file on disk.
    File(PathBuf),
    /// Already-decoded JSON document.
    Document(Value),
    /// Already-typed snapshot.
    Snapshot(Snapshot),
}

impl From<PathBuf> for BackupSource {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl From<Value> for BackupSource {
    fn from(value: Value) -> Self {
        Self::Document(value)
    }
}

impl From<Snapshot> for BackupSource {
    fn from(value: Snapshot) -> Self {
        Self::Snapshot(value)
    }
}

impl BackupSource {
    /// Resolves this source into a snapshot.
    pub fn into_snapshot(self) -> LoadResult<Snapshot> {
        match self {
            Self::File(path) => load_snapshot(path),
            Self::Document(value) => snapshot_from_value(value),
            Self::Snapshot(snapshot) => Ok(snapshot),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    /// Neither a file path nor an in-memory document was supplied.
    NoSource,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Content is not valid JSON.
    Json(serde_json::Error),
    /// JSON is valid but does not have the backup document shape.
    Shape(SnapshotError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSource => write!(f, "no backup file or in-memory document provided"),
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "backup is not valid JSON: {err}"),
            Self::Shape(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoSource => None,
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Shape(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for LoadError {
    fn from(value: SnapshotError) -> Self {
        Self::Shape(value)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
