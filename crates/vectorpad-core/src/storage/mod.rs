//! Storage abstraction for persistence.

mod file;
mod memory;
pub mod text;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::canvas::CanvasDocument;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Group opened on line {line} is never closed")]
    UnterminatedGroup { line: usize },
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
///
/// Backends hold documents in the native text format, so every load goes
/// through the same parser regardless of where the text lives.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, key: &str, document: &CanvasDocument) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, key: &str) -> StorageResult<CanvasDocument>;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all document keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
