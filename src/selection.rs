//! Selected-employee persistence with JSON file storage

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// On-disk layout of the selection file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SelectionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_employee: Option<String>,
}

/// Remembers which employee the dashboard shows across restarts
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved employee
    ///
    /// A missing file means nothing was saved yet; an unreadable or corrupt
    /// file is logged and treated the same way.
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            debug!("No saved selection at {:?}", self.path);
            return None;
        }

        match self.read_file() {
            Ok(file) => file.current_employee.filter(|name| !name.trim().is_empty()),
            Err(e) => {
                warn!("Failed to load saved selection from {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Saved employee, or `default` when none is saved
    pub fn load_or(&self, default: &str) -> String {
        self.load().unwrap_or_else(|| default.to_string())
    }

    /// Persist the selected employee (atomic write via temp file + rename)
    pub fn save(&self, employee: &str) -> Result<()> {
        let file = SelectionFile {
            current_employee: Some(employee.to_string()),
        };
        let content = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        debug!("Selection saved to {:?}", self.path);
        Ok(())
    }

    fn read_file(&self) -> Result<SelectionFile> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionStore::new(dir.path().join("state.json"));

        assert_eq!(store.load(), None);
        assert_eq!(store.load_or("John Marwin"), "John Marwin");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionStore::new(dir.path().join("nested").join("state.json"));

        store.save("Ana Cruz").unwrap();
        assert_eq!(store.load(), Some("Ana Cruz".to_string()));

        store.save("John Marwin").unwrap();
        assert_eq!(store.load_or("Someone"), "John Marwin");
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SelectionStore::new(path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"current_employee": "  "}"#).unwrap();

        let store = SelectionStore::new(path);
        assert_eq!(store.load_or("John Marwin"), "John Marwin");
    }
}
