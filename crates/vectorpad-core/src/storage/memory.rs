//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult, text};
use crate::canvas::CanvasDocument;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Documents are kept encoded, so loading exercises the same parser as
/// reading a file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `key` without going through the encoder.
    pub fn insert_raw(&self, key: &str, contents: &str) {
        if let Ok(mut docs) = self.documents.write() {
            docs.insert(key.to_string(), contents.to_string());
        }
    }

    /// Raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.documents.read().ok()?.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, document: &CanvasDocument) -> StorageResult<()> {
        let encoded = text::encode(document);
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.insert(key.to_string(), encoded);
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<CanvasDocument> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        let contents = docs
            .get(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        text::decode(contents)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.remove(key);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Color, Line, Point};

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let mut doc = CanvasDocument::new();
        doc.add_shape(Line::new(Point::new(1, 2), Point::new(3, 4), Color::BLUE).into());

        storage.save("test", &doc).unwrap();
        assert_eq!(storage.raw("test").as_deref(), Some("line 1 2 3 4 (0,0,255)\n"));

        let loaded = storage.load("test").unwrap();
        assert!(loaded.same_content(&doc));
        assert_ne!(loaded.ids(), doc.ids());
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.load("nonexistent");

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_malformed_raw_text() {
        let storage = MemoryStorage::new();
        storage.insert_raw("bad", "rect 0 0 1 1 (0,0,0)\n");
        assert!(matches!(
            storage.load("bad"),
            Err(StorageError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();
        let doc = CanvasDocument::new();

        assert!(!storage.exists("test").unwrap());
        storage.save("test", &doc).unwrap();
        assert!(storage.exists("test").unwrap());
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();
        let doc = CanvasDocument::new();

        storage.save("test", &doc).unwrap();
        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let doc = CanvasDocument::new();

        storage.save("doc1", &doc).unwrap();
        storage.save("doc2", &doc).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }
}
