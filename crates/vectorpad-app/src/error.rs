//! Application errors.

use std::path::PathBuf;
use thiserror::Error;
use vectorpad_core::StorageError;

/// Errors reported by the command line shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),
}

pub type AppResult<T> = Result<T, AppError>;
