//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its partial-update patch.
//! - Generate fresh identifiers and creation timestamps.
//!
//! # Invariants
//! - Fresh ids are UUIDv7 strings, so they sort by creation time.
//! - Ids loaded from storage are kept verbatim, whatever their shape.
//! - `timestamp` is UTC ISO-8601 with millisecond precision and `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one note.
///
/// Kept as an opaque string because older clients persisted decimal
/// millisecond ids that must keep loading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Creation time, e.g. `2024-01-05T15:04:05.123Z`.
    pub timestamp: String,
}

impl Note {
    /// Creates a note with a fresh id and the current time.
    ///
    /// Title and content are trimmed; emptiness is not checked here.
    pub fn new(title: &str, content: &str) -> Self {
        Self::with_id(NoteId::generate(), title, content, Utc::now())
    }

    /// Creates a note with a caller-provided id and creation time.
    pub fn with_id(id: NoteId, title: &str, content: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            timestamp: format_timestamp(created_at),
        }
    }

    /// Merges present patch fields into this note.
    ///
    /// Returns `true` when any field was present in the patch.
    pub fn apply(&mut self, patch: NotePatch) -> bool {
        let touched = !patch.is_empty();
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        touched
    }

    /// Parses `timestamp`, returning `None` for foreign or corrupt values.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Partial-field update for `NoteStore::update`.
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub timestamp: Option<String>,
}

impl NotePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.timestamp.is_none()
    }
}

/// Formats a UTC instant the way notes store it.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, Note, NoteId, NotePatch};
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamp_uses_millisecond_zulu_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 5).unwrap();
        assert_eq!(format_timestamp(at), "2024-01-05T15:04:05.000Z");
    }

    #[test]
    fn new_trims_fields_and_assigns_id() {
        let note = Note::new("  title ", "\n body \t");
        assert_eq!(note.title, "title");
        assert_eq!(note.content, "body");
        assert!(!note.id.as_str().is_empty());
        assert!(note.created_at().is_some());
    }

    #[test]
    fn generated_ids_differ_within_one_millisecond() {
        let ids: Vec<NoteId> = (0..64).map(|_| NoteId::generate()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut note = Note::with_id(NoteId::from("1"), "a", "b", Utc::now());
        let before = note.timestamp.clone();
        assert!(note.apply(NotePatch::new().content("changed")));
        assert_eq!(note.title, "a");
        assert_eq!(note.content, "changed");
        assert_eq!(note.timestamp, before);
        assert!(!note.apply(NotePatch::new()));
    }
}
