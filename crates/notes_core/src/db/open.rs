//! Connection bootstrap for the key-value mirror.
//!
//! # Invariants
//! - Returned connections hold a `kv` table at `KV_LAYOUT_VERSION`.
//! - Every open attempt emits one `storage_open` start event and one
//!   terminal ok/error event.

use super::{DbError, DbResult, KV_LAYOUT_VERSION};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const CREATE_KV_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// Opens (creating if needed) a kv mirror file.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - Emits `storage_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory kv mirror.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=storage_open module=db status=start mode={mode}");

    let result = connect()
        .map_err(DbError::from)
        .and_then(|mut conn| prepare_kv(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=storage_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=storage_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn prepare_kv(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found > KV_LAYOUT_VERSION {
        return Err(DbError::NewerKvLayout { found });
    }
    if found == KV_LAYOUT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_TABLE)?;
    tx.pragma_update(None, "user_version", KV_LAYOUT_VERSION)?;
    tx.commit()?;
    Ok(())
}
