//! Default backup file discovery.
//!
//! # Responsibility
//! - Find the most recently modified `humane-tracker-backup-*.json` file.
//!
//! # Invariants
//! - Unreadable directories and entries are skipped, never reported as errors.
//! - Only regular files directly inside the directory are considered.

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

static BACKUP_FILE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^humane-tracker-backup-.*\.json$").expect("valid backup file name regex")
});

/// Whether `file_name` matches the backup export naming pattern.
pub fn is_backup_file_name(file_name: &str) -> bool {
    BACKUP_FILE_NAME_RE.is_match(file_name)
}

/// Directory scanned when no backup file is given: the parent of the
/// current working directory.
pub fn default_backup_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    Some(cwd.parent().map(Path::to_path_buf).unwrap_or(cwd))
}

/// Returns the newest backup file in `dir`, by modification time.
pub fn find_latest_backup(dir: &Path) -> Option<PathBuf> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            warn!(
                "event=backup_discover module=backup status=skipped dir={} error={}",
                dir.display(),
                err
            );
            return None;
        }
    };

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in read_dir.flatten() {
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if !is_backup_file_name(file_name) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let is_newer = latest
            .as_ref()
            .map_or(true, |(current, _)| modified > *current);
        if is_newer {
            latest = Some((modified, entry.path()));
        }
    }

    let found = latest.map(|(_, path)| path);
    info!(
        "event=backup_discover module=backup status={} dir={}",
        if found.is_some() { "ok" } else { "not_found" },
        dir.display()
    );
    found
}
