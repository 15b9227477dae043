//! Domain model for notes.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Keep the wire shape (`id`, `title`, `content`, `timestamp`) stable.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` unique within one collection.
//! - Identity never changes after creation; patches cannot touch `id`.

pub mod note;
