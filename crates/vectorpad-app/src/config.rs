//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vectorpad_core::EditorConfig;

/// Settings read from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default log filter; `RUST_LOG` takes precedence.
    pub log_level: String,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config location.
    ///
    /// On Unix: `~/.config/vectorpad/config.json`
    /// On Windows: `%APPDATA%\vectorpad\config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vectorpad").join("config.json"))
    }

    /// Load the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from an explicit path, or from the default location.
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vectorpad_core::Color;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "log_level": "debug", "editor": { "default_color": { "r": 0, "g": 0, "b": 255 } } }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.editor.default_color, Color::BLUE);
        assert_eq!(config.editor.radius_step, EditorConfig::default().radius_step);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }
}
