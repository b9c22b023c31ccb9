//! Snapshot decoding from files, strings and JSON values.
//!
//! # Responsibility
//! - Decode backup JSON and validate the minimal document shape.
//! - Emit `backup_load` logging events with duration and status.

use super::{LoadError, LoadResult};
use crate::model::snapshot::Snapshot;
use log::{error, info};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// Reads and decodes a backup file.
///
/// # Errors
/// - [`LoadError::Io`] when the file cannot be read.
/// - [`LoadError::Json`] when the content is not JSON.
/// - [`LoadError::Shape`] when the document is not a backup object.
pub fn load_snapshot(path: impl AsRef<Path>) -> LoadResult<Snapshot> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=backup_load module=backup status=start mode=file");

    let result = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|content| decode(content.as_str()));

    log_outcome("file", started_at, &result);
    result
}

/// Decodes a backup document from a JSON string.
pub fn parse_snapshot(json: &str) -> LoadResult<Snapshot> {
    let started_at = Instant::now();
    let result = decode(json);
    log_outcome("string", started_at, &result);
    result
}

/// Validates an already-decoded JSON document as a snapshot.
pub fn snapshot_from_value(value: Value) -> LoadResult<Snapshot> {
    let started_at = Instant::now();
    let result = Snapshot::from_value(value).map_err(LoadError::from);
    log_outcome("memory", started_at, &result);
    result
}

fn decode(json: &str) -> LoadResult<Snapshot> {
    let value: Value = serde_json::from_str(json)?;
    Ok(Snapshot::from_value(value)?)
}

fn log_outcome(mode: &str, started_at: Instant, result: &LoadResult<Snapshot>) {
    match result {
        Ok(snapshot) => info!(
            "event=backup_load module=backup status=ok mode={} duration_ms={} habits={} entries={}",
            mode,
            started_at.elapsed().as_millis(),
            snapshot.habits.len(),
            snapshot.entries.len()
        ),
        Err(err) => error!(
            "event=backup_load module=backup status=error mode={} duration_ms={} code={} error={}",
            mode,
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
}

fn error_code(err: &LoadError) -> &'static str {
    match err {
        LoadError::NoSource => "no_source",
        LoadError::Io { .. } => "read_failed",
        LoadError::Json(_) => "invalid_json",
        LoadError::Shape(_) => "invalid_shape",
    }
}
