//! SQLite bootstrap for the durable key-value mirror.
//!
//! # Responsibility
//! - Open file and in-memory connections used by `SqliteStorage`.
//! - Create the `kv` table and stamp its layout revision.
//!
//! # Invariants
//! - The layout revision lives in `PRAGMA user_version`.
//! - A file stamped by a newer build is refused, never rewritten.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

/// Layout revision of the `kv` table this build reads and writes.
pub const KV_LAYOUT_VERSION: u32 = 1;

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening the kv mirror.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file carries a `kv` layout this build does not know.
    NewerKvLayout { found: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "kv mirror: {err}"),
            Self::NewerKvLayout { found } => write!(
                f,
                "kv mirror has layout {found}, this build only reads {KV_LAYOUT_VERSION}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerKvLayout { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
