use notes_core::db::{open_db, open_db_in_memory, DbError, KV_LAYOUT_VERSION};
use notes_core::{KeyValueStorage, NoteStore, SqliteStorage, StorageError};
use rusqlite::Connection;

fn layout_of(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_mirror_is_stamped_and_usable() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(layout_of(&conn), KV_LAYOUT_VERSION);

    let mut storage = SqliteStorage::from_connection(conn);
    storage.set_item("k", "v").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn reopening_a_stamped_file_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.sqlite3");

    SqliteStorage::from_connection(open_db(&path).unwrap())
        .set_item("k", "kept")
        .unwrap();

    let conn = open_db(&path).unwrap();
    assert_eq!(layout_of(&conn), KV_LAYOUT_VERSION);
    let storage = SqliteStorage::from_connection(conn);
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("kept"));
}

#[test]
fn file_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "user_version", KV_LAYOUT_VERSION + 1)
        .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::NewerKvLayout { found } => assert_eq!(found, KV_LAYOUT_VERSION + 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_storage_set_replace_remove() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.get_item("k").unwrap(), None);

    storage.set_item("k", "one").unwrap();
    storage.set_item("k", "two").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));

    storage.remove_item("k").unwrap();
    storage.remove_item("k").unwrap();
    assert_eq!(storage.get_item("k").unwrap(), None);
}

#[test]
fn sqlite_storage_quota_rejects_and_keeps_previous_value() {
    let mut storage = SqliteStorage::open_in_memory().unwrap().with_quota(Some(10));
    storage.set_item("k", "12345").unwrap();

    let err = storage.set_item("k", "1234567890").unwrap_err();
    match err {
        StorageError::QuotaExceeded {
            requested, quota, ..
        } => {
            assert_eq!(requested, 11);
            assert_eq!(quota, 10);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("12345"));
}

#[test]
fn notes_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let expected = {
        let mut store = NoteStore::new(SqliteStorage::open(&path).unwrap());
        store.init();
        store.add("kept", "on disk").unwrap();
        store.get_all()
    };

    let mut reopened = NoteStore::new(SqliteStorage::open(&path).unwrap());
    assert_eq!(reopened.init(), 1);
    assert_eq!(reopened.get_all(), expected);
}
