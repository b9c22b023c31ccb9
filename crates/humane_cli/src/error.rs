//! CLI error type and exit-code mapping.

use humane_core::LoadError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    /// No file argument and no backup found in the backup directory.
    NoBackupFound,
    FileNotFound(PathBuf),
    Load(LoadError),
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Terminal prompt failure, e.g. stdin is not a terminal.
    Prompt(dialoguer::Error),
    /// A merge needs at least two habits to choose from.
    NotEnoughHabits,
    /// A habit id passed on the command line is not in the backup.
    UnknownHabit(String),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoBackupFound => write!(f, "No backup file found. Please specify a file."),
            Self::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::Load(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode merged backup: {err}"),
            Self::Prompt(err) => write!(f, "prompt failed: {err}"),
            Self::NotEnoughHabits => write!(f, "Need at least 2 habits to merge"),
            Self::UnknownHabit(id) => write!(f, "Unknown habit id: {id}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Prompt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LoadError> for CliError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(value: dialoguer::Error) -> Self {
        Self::Prompt(value)
    }
}
