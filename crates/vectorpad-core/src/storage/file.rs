//! File-based storage implementation.

use super::{Storage, StorageError, StorageResult, text};
use crate::canvas::CanvasDocument;
use crate::export;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage.
///
/// Keys are file paths, resolved against a base directory. Absolute keys
/// ignore the base. Each document is one file in the native text format,
/// read and written whole.
#[derive(Debug, Clone, Default)]
pub struct FileStorage {
    /// Base directory for relative keys. Empty means the working directory.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Storage resolving keys against the working directory.
    pub fn working_dir() -> Self {
        Self::default()
    }

    /// Get the file path for a document key.
    pub fn document_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write the XML export of `document` to `key`.
    pub fn export_xml(&self, key: &str, document: &CanvasDocument) -> StorageResult<()> {
        let path = self.document_path(key);
        fs::write(&path, export::to_xml(document)).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::info!("Exported {} shapes to {}", document.len(), path.display());
        Ok(())
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, document: &CanvasDocument) -> StorageResult<()> {
        let path = self.document_path(key);
        fs::write(&path, text::encode(document)).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::info!("Saved {} shapes to {}", document.len(), path.display());
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<CanvasDocument> {
        let path = self.document_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let document = text::decode(&contents)?;
        log::info!("Loaded {} shapes from {}", document.len(), path.display());
        Ok(document)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.document_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let base = if self.base_path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.base_path.as_path()
        };

        let entries = fs::read_dir(base)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut keys = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                keys.push(name.to_string());
            }
        }
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.document_path(key).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Color, Group, Line, Point, Rectangle};
    use tempfile::tempdir;

    fn sample_document() -> CanvasDocument {
        let mut doc = CanvasDocument::new();
        let group = Group::new(vec![
            Line::new(Point::new(0, 0), Point::new(10, 10), Color::RED).into(),
            Rectangle::rounded(Point::new(5, 5), Point::new(20, 20), Color::BLACK, 5).into(),
        ]);
        doc.add_shape(group.into());
        doc
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let doc = sample_document();

        storage.save("drawing.txt", &doc).unwrap();
        let loaded = storage.load("drawing.txt").unwrap();
        assert!(loaded.same_content(&doc));
    }

    #[test]
    fn test_file_storage_writes_text_format() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("drawing.txt", &sample_document()).unwrap();
        let contents = fs::read_to_string(dir.path().join("drawing.txt")).unwrap();
        let records: Vec<&str> = contents.lines().collect();
        assert_eq!(records[0], "begin");
        assert!(records[1].starts_with("line "));
        assert!(records[2].starts_with("rect ") && records[2].ends_with(" r 5"));
        assert_eq!(records[3], "end");
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent.txt");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_malformed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.txt"), "line 0 0 1 1 (0,0,0)\nbegin\n").unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("bad.txt");
        assert!(matches!(result, Err(StorageError::UnterminatedGroup { line: 2 })));
    }

    #[test]
    fn test_absolute_key_ignores_base() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::working_dir();
        let path = dir.path().join("abs.txt");
        let key = path.to_str().unwrap();

        storage.save(key, &sample_document()).unwrap();
        assert!(storage.exists(key).unwrap());
        assert!(path.is_file());
    }

    #[test]
    fn test_file_storage_list() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let doc = CanvasDocument::new();
        storage.save("doc1.txt", &doc).unwrap();
        storage.save("doc2.txt", &doc).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1.txt".to_string()));
        assert!(list.contains(&"doc2.txt".to_string()));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test.txt", &CanvasDocument::new()).unwrap();
        assert!(storage.exists("test.txt").unwrap());

        storage.delete("test.txt").unwrap();
        assert!(!storage.exists("test.txt").unwrap());
        storage.delete("test.txt").unwrap();
    }

    #[test]
    fn test_export_xml() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.export_xml("drawing.xml", &sample_document()).unwrap();
        let xml = fs::read_to_string(dir.path().join("drawing.xml")).unwrap();
        assert!(xml.starts_with("<drawing>"));
        assert!(xml.contains("<corner>rounded</corner>"));
    }
}
