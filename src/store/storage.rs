//! Where the configuration document lives.
//!
//! `ProfileStore` only deals in document text; the storage decides where
//! that text is kept. The JSON file backend writes atomically so that a
//! crash mid-save never leaves a truncated document behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV};

/// Backing storage for the configuration document.
pub trait ConfigStorage: Send {
    /// Read the stored document; `Ok(None)` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored document as a whole.
    fn write(&self, contents: &str) -> Result<(), StoreError>;

    /// Human-readable location, for logs and `status` output.
    fn describe(&self) -> String;
}

/// Document stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the resolved default location (see [`default_config_path`]).
    pub fn at_default_location() -> Result<Self, StoreError> {
        default_config_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }

        // Atomic save: write to temp file then rename over the document
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents).map_err(|e| self.io_err(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Resolve the document path: `$MOUSEMAP_CONFIG` if set, else
/// `<data dir>/Mousemap/config.json`.
pub fn default_config_path() -> Result<PathBuf, StoreError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(StoreError::NoConfigLocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("config.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_and_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let storage = JsonFileStorage::new(&path);

        storage.write("{\"a\": 1, \"padding\": \"xxxxxxxx\"}").unwrap();
        storage.write("{}").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn describe_shows_path() {
        let storage = JsonFileStorage::new("/tmp/x/config.json");
        assert_eq!(storage.describe(), "/tmp/x/config.json");
    }
}
