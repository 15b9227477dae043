//! Core of the notes application.
//!
//! A note store mirrored to host key-value storage, a client-side router,
//! and the views and composition root that tie them together. Host
//! facilities (history, content mount, storage) are traits so the same core
//! runs in a terminal, in tests, or behind a browser binding.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod router;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{App, SubmitOutcome, EMPTY_FIELDS_MESSAGE};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NotePatch};
pub use router::{
    History, MemoryHistory, MemoryMount, Mount, RenderRequest, RouteOutcome, RouteParams, Router,
    NOT_FOUND_MARKUP,
};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::{
    NoteStore, StorageAlert, StoreError, StoreResult, Subscription, DEFAULT_STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
