//! Durable key-value storage backends.
//!
//! # Responsibility
//! - Define the host storage contract the note store persists through.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Writes are synchronous: a successful `set_item` is visible to the next
//!   `get_item` on the same backend.
//! - A write that would exceed the configured quota fails with
//!   `StorageError::QuotaExceeded` and leaves the previous value in place.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend failure.
#[derive(Debug)]
pub enum StorageError {
    /// Writing `key` would grow the backend to `requested` bytes, over `quota`.
    QuotaExceeded {
        key: String,
        requested: usize,
        quota: usize,
    },
    /// SQLite-level failure.
    Db(DbError),
}

impl StorageError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                key,
                requested,
                quota,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {requested} bytes requested, quota is {quota}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Host key-value storage contract, string keys to string values.
pub trait KeyValueStorage {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`; absent keys are not an error.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Size accounted against a quota for one entry.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
