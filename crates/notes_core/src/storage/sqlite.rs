use super::{entry_size, KeyValueStorage, StorageError, StorageResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;

/// SQLite-backed storage over a single `kv` table.
pub struct SqliteStorage {
    conn: Connection,
    quota: Option<usize>,
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already went through `open_db`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn, quota: None }
    }

    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let quota = self.quota;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(quota) = quota {
            let others: i64 = tx.query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
                 FROM kv
                 WHERE key <> ?1;",
                [key],
                |row| row.get(0),
            )?;
            let requested = usize::try_from(others).unwrap_or(usize::MAX) + entry_size(key, value);
            if requested > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    quota,
                });
            }
        }

        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
        Ok(())
    }
}
