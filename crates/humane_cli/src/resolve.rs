//! Backup file resolution for commands that take an optional file.

use crate::error::CliError;
use humane_core::{default_backup_dir, find_latest_backup, HabitData};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Picks the backup to open: `file` when given, otherwise the newest backup
/// in `backup_dir` (or the default backup directory).
pub fn resolve_backup(
    file: Option<&Path>,
    backup_dir: Option<&Path>,
    messages: &mut impl Write,
) -> Result<PathBuf, CliError> {
    let path = match file {
        Some(file) => file.to_path_buf(),
        None => {
            let dir = match backup_dir {
                Some(dir) => dir.to_path_buf(),
                None => default_backup_dir().ok_or(CliError::NoBackupFound)?,
            };
            let found = find_latest_backup(&dir).ok_or(CliError::NoBackupFound)?;
            writeln!(messages, "Using: {}", found.display())?;
            found
        }
    };

    if !path.exists() {
        return Err(CliError::FileNotFound(path));
    }
    Ok(path)
}

/// Resolves and loads a backup in one step.
pub fn load_data(
    file: Option<&Path>,
    backup_dir: Option<&Path>,
    messages: &mut impl Write,
) -> Result<HabitData, CliError> {
    let path = resolve_backup(file, backup_dir, messages)?;
    Ok(HabitData::from_path(path)?)
}
