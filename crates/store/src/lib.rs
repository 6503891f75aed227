//! `portaria-store` — the injected persistence port.
//!
//! One pretty-printed JSON file per mapping name under a data directory.
//! Callers load a collection, hand values to the engine crates, and save
//! the result back; the engine crates never see this layer.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Mapping name for the delivery collection.
pub const DELIVERIES_KEY: &str = "deliveries";
/// Mapping name for the resident directory.
pub const RESIDENTS_KEY: &str = "residents";

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, message: String },
    /// The file exists but does not parse. Surfaced, never silently
    /// replaced; the caller decides what to do with a damaged mapping.
    Corrupt { path: PathBuf, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot access {}: {message}", path.display())
            }
            Self::Corrupt { path, message } => {
                write!(f, "corrupt data file {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// File-per-key JSON store.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (`<platform data dir>/portaria`).
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("portaria")
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load a collection. A missing file is the empty collection
    /// (first-run behavior), a damaged one is an error.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path).map_err(|e| StoreError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path,
            message: e.to_string(),
        })
    }

    /// Save a collection, creating the data directory if needed.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let json = serde_json::to_string_pretty(items).map_err(|e| StoreError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, json).map_err(|e| StoreError::Io {
            path,
            message: e.to_string(),
        })
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|e| StoreError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })
}
