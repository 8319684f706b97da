//! Key-value storage for the persisted session
//!
//! Mirrors browser local storage: string values addressed by string keys,
//! written wholesale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::SessionError;

/// Storage file name inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// String key-value storage
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: String) -> Result<(), SessionError>;

    /// Remove a value; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-process storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with one entry
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// File-backed storage holding every key in one JSON object
pub struct FileStorage {
    entries: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
}

impl FileStorage {
    /// Load storage from `dir/storage.json`, or start empty.
    ///
    /// An unreadable or corrupt file starts empty as well; the next write
    /// replaces it.
    pub async fn load(dir: &Path) -> Result<Self, SessionError> {
        Self::load_file(dir.join(STORAGE_FILE)).await
    }

    /// Load storage from an explicit file path
    pub async fn load_file(file_path: PathBuf) -> Result<Self, SessionError> {
        let entries = if fs::try_exists(&file_path).await.unwrap_or(false) {
            let content = fs::read_to_string(&file_path).await.map_err(|e| {
                SessionError::Storage(format!("failed to read {}: {}", file_path.display(), e))
            })?;
            match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %file_path.display(), error = %e, "Ignoring corrupt storage file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                SessionError::Storage(format!("failed to create storage dir: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| SessionError::Storage(format!("failed to serialize storage: {}", e)))?;

        fs::write(&self.file_path, content).await.map_err(|e| {
            SessionError::Storage(format!(
                "failed to write {}: {}",
                self.file_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}
