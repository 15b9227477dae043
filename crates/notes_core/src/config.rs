//! Application configuration.
//!
//! Hosts build an `AppConfig` (the CLI fills it from flags) and use it to
//! open storage and construct the store.

use crate::db::DbResult;
use crate::logging::default_log_level;
use crate::storage::{MemoryStorage, SqliteStorage};
use crate::store::{NoteStore, DEFAULT_STORAGE_KEY};
use std::path::PathBuf;

/// Default SQLite file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "notes.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Key holding the serialized collection.
    pub storage_key: String,
    /// Byte quota for the storage backend; `None` means unlimited.
    pub quota_bytes: Option<usize>,
    /// SQLite file; `None` keeps notes in memory only.
    pub data_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    /// Location rendered on start.
    pub start_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: None,
            data_path: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            log_level: default_log_level().to_string(),
            log_dir: None,
            start_path: "/".to_string(),
        }
    }
}

impl AppConfig {
    /// Opens the configured SQLite file, or an in-memory database.
    pub fn open_sqlite(&self) -> DbResult<SqliteStorage> {
        let storage = match &self.data_path {
            Some(path) => SqliteStorage::open(path)?,
            None => SqliteStorage::open_in_memory()?,
        };
        Ok(storage.with_quota(self.quota_bytes))
    }

    /// Memory storage honoring the configured quota.
    pub fn memory_storage(&self) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.set_quota(self.quota_bytes);
        storage
    }

    /// Builds an uninitialized store over `storage` under the configured key.
    pub fn build_store<S: crate::storage::KeyValueStorage>(&self, storage: S) -> NoteStore<S> {
        NoteStore::with_key(storage, self.storage_key.as_str())
    }
}
