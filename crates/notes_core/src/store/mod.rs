//! Note store: canonical in-memory collection plus its durable mirror.
//!
//! # Responsibility
//! - Own the note collection and load/save it under one storage key.
//! - Notify subscribers synchronously after every successful mutation.
//! - Report storage exhaustion to the host before propagating it.
//!
//! # Invariants
//! - Collection order is newest first; `add` prepends.
//! - Ids are unique within the collection.
//! - Every mutation writes the full collection as `{"notes": [...]}`.
//! - Failed mutations never notify subscribers.
//! - Logs carry ids and counts only, never titles or contents.

mod subscribers;

pub use subscribers::Subscription;

use crate::model::note::{Note, NoteId, NotePatch};
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use subscribers::Subscribers;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "notes-app-data";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation error.
#[derive(Debug)]
pub enum StoreError {
    /// No note has the requested id.
    NotFound(NoteId),
    /// The storage backend is out of capacity. The in-memory change is kept.
    StorageExhausted(StorageError),
    /// Any other storage failure while persisting.
    Storage(StorageError),
    /// The collection could not be encoded.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note with id {id} not found"),
            Self::StorageExhausted(err) => write!(f, "storage exhausted: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::StorageExhausted(err) | Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Host hook told about storage exhaustion before the error propagates.
///
/// The host should offer the user a chance to free space.
pub trait StorageAlert {
    fn storage_exhausted(&self, error: &StorageError);
}

impl<F: Fn(&StorageError)> StorageAlert for F {
    fn storage_exhausted(&self, error: &StorageError) {
        self(error)
    }
}

#[derive(Serialize)]
struct PersistedNotesRef<'a> {
    notes: &'a [Note],
}

#[derive(Deserialize)]
struct PersistedNotes {
    #[serde(default)]
    notes: Option<Vec<Note>>,
}

/// Sole owner of the note collection.
pub struct NoteStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    notes: Vec<Note>,
    subscribers: Subscribers,
    alert: Option<Box<dyn StorageAlert>>,
}

impl<S: KeyValueStorage> NoteStore<S> {
    /// Creates an empty store over `storage` using `DEFAULT_STORAGE_KEY`.
    ///
    /// Call `init` to load the durable mirror.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            notes: Vec::new(),
            subscribers: Subscribers::default(),
            alert: None,
        }
    }

    /// Installs the storage-exhausted reporter.
    pub fn with_alert(mut self, alert: impl StorageAlert + 'static) -> Self {
        self.alert = Some(Box::new(alert));
        self
    }

    /// Replaces the in-memory collection with the durable mirror.
    ///
    /// Missing, unreadable or malformed data yields an empty collection.
    /// Returns the number of notes loaded.
    pub fn init(&mut self) -> usize {
        self.notes = self.load();
        info!(
            "event=store_load module=store status=ok key={} count={}",
            self.key,
            self.notes.len()
        );
        self.notes.len()
    }

    fn load(&self) -> Vec<Note> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error key={} error_code=storage_read_failed error={err}",
                    self.key
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<PersistedNotes>(&raw) {
            Ok(persisted) => persisted.notes.unwrap_or_default(),
            Err(err) => {
                error!(
                    "event=store_load module=store status=error key={} error_code=malformed_data error={err}",
                    self.key
                );
                Vec::new()
            }
        }
    }

    /// Returns a copy of the collection, newest first.
    pub fn get_all(&self) -> Vec<Note> {
        self.notes.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Note> {
        self.notes.iter().find(|note| note.id.as_str() == id).cloned()
    }

    /// Creates, prepends and persists a note.
    ///
    /// Title and content are trimmed. Empty values are accepted; callers
    /// validate input.
    pub fn add(&mut self, title: &str, content: &str) -> StoreResult<Note> {
        let mut note = Note::new(title, content);
        while self.position(note.id.as_str()).is_some() {
            note.id = NoteId::generate();
        }

        self.notes.insert(0, note.clone());
        self.commit("add", &note.id)?;
        Ok(note)
    }

    /// Merges present `patch` fields into the note with `id`.
    pub fn update(&mut self, id: &str, patch: NotePatch) -> StoreResult<Note> {
        let index = self.require(id)?;
        self.notes[index].apply(patch);
        let updated = self.notes[index].clone();
        self.commit("update", &updated.id)?;
        Ok(updated)
    }

    /// Removes the note with `id`, keeping the others in order.
    pub fn delete(&mut self, id: &str) -> StoreResult<Note> {
        let index = self.require(id)?;
        let removed = self.notes.remove(index);
        self.commit("delete", &removed.id)?;
        Ok(removed)
    }

    /// Registers `callback` to run after every successful mutation.
    pub fn subscribe(&self, callback: impl FnMut() + 'static) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id.as_str() == id)
    }

    fn require(&self, id: &str) -> StoreResult<usize> {
        self.position(id)
            .ok_or_else(|| StoreError::NotFound(NoteId::from(id)))
    }

    fn commit(&mut self, op: &'static str, id: &NoteId) -> StoreResult<()> {
        self.persist(op)?;
        debug!(
            "event=store_mutation module=store status=ok op={op} note_id={id} count={}",
            self.notes.len()
        );
        self.subscribers.notify();
        Ok(())
    }

    fn persist(&mut self, op: &'static str) -> StoreResult<()> {
        let encoded = serde_json::to_string(&PersistedNotesRef { notes: &self.notes })
            .map_err(StoreError::Encode)?;

        match self.storage.set_item(&self.key, &encoded) {
            Ok(()) => Ok(()),
            Err(err) if err.is_quota_exceeded() => {
                error!(
                    "event=store_persist module=store status=error op={op} error_code=storage_exhausted bytes={}",
                    encoded.len()
                );
                if let Some(alert) = &self.alert {
                    alert.storage_exhausted(&err);
                }
                Err(StoreError::StorageExhausted(err))
            }
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error op={op} error_code=storage_write_failed error={err}"
                );
                Err(StoreError::Storage(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, DEFAULT_STORAGE_KEY};
    use crate::storage::{KeyValueStorage, MemoryStorage};

    #[test]
    fn persisted_shape_wraps_notes_array() {
        let mut store = NoteStore::new(MemoryStorage::new());
        let note = store.add("t", "c").unwrap();

        let raw = store
            .storage()
            .get_item(DEFAULT_STORAGE_KEY)
            .unwrap()
            .expect("notes persisted");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["notes"][0]["id"], note.id.as_str());
        assert_eq!(value["notes"][0]["title"], "t");
        assert_eq!(value["notes"][0]["content"], "c");
        assert_eq!(value["notes"][0]["timestamp"], note.timestamp.as_str());
    }

    #[test]
    fn null_notes_field_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(DEFAULT_STORAGE_KEY, r#"{"notes":null}"#)
            .unwrap();
        let mut store = NoteStore::new(storage);
        assert_eq!(store.init(), 0);
    }
}
