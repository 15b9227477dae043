//! Composition root wiring the note store to the router.
//!
//! # Responsibility
//! - Construct one store and one router per process.
//! - Register the `/`, `/create` and `/note/:id` routes.
//! - Turn host events (link clicks, form submits, history moves) into store
//!   and router calls.
//!
//! # Invariants
//! - Rendering is pull-based: store notifications never trigger a render.
//!   Only navigation (including `delete_note`'s refresh) renders.

use crate::model::note::Note;
use crate::router::{History, Mount, Router};
use crate::storage::KeyValueStorage;
use crate::store::{NoteStore, StoreResult};
use crate::view::{create_view, home_view, note_detail_view};
use log::info;

/// Message shown when the create form is submitted with a blank field.
pub const EMPTY_FIELDS_MESSAGE: &str = "Please fill in both title and content";

/// Result of submitting the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The note was stored and the app navigated home.
    Created(Note),
    /// Input was rejected before reaching the store; nothing changed.
    Rejected(&'static str),
}

/// Registers the application routes on `router`.
pub fn register_routes<S, H, M>(router: &mut Router<H, M, NoteStore<S>>)
where
    S: KeyValueStorage + 'static,
    H: History,
    M: Mount,
{
    router.register_route("/", home_view::<S>);
    router.register_route("/create", create_view::<S>);
    router.register_route("/note/:id", note_detail_view::<S>);
}

/// The notes application.
pub struct App<S, H, M>
where
    S: KeyValueStorage + 'static,
    H: History,
    M: Mount,
{
    store: NoteStore<S>,
    router: Router<H, M, NoteStore<S>>,
}

impl<S, H, M> App<S, H, M>
where
    S: KeyValueStorage + 'static,
    H: History,
    M: Mount,
{
    pub fn new(store: NoteStore<S>, history: H, mount: M) -> Self {
        let mut router = Router::new(history, mount);
        register_routes(&mut router);
        Self { store, router }
    }

    /// Loads persisted notes, then renders the current location.
    ///
    /// Returns the number of notes loaded.
    pub fn start(&mut self) -> usize {
        let loaded = self.store.init();
        self.router.init(&self.store);
        info!(
            "event=app_start module=app status=ok notes={loaded} path={}",
            self.router.current_path()
        );
        loaded
    }

    pub fn navigate(&mut self, path: &str) {
        self.router.navigate_to(path, &self.store);
    }

    /// Delivers a click on `href`; see `Router::follow_link`.
    pub fn click(&mut self, href: &str) -> bool {
        self.router.follow_link(href, &self.store)
    }

    pub fn back(&mut self) -> bool {
        self.router.back(&self.store)
    }

    pub fn forward(&mut self) -> bool {
        self.router.forward(&self.store)
    }

    /// Handles the create form: validates, stores, then navigates home.
    pub fn submit_create(&mut self, title: &str, content: &str) -> StoreResult<SubmitOutcome> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Ok(SubmitOutcome::Rejected(EMPTY_FIELDS_MESSAGE));
        }

        let note = self.store.add(title, content)?;
        self.navigate("/");
        Ok(SubmitOutcome::Created(note))
    }

    /// Deletes one note and re-renders the current location.
    pub fn delete_note(&mut self, id: &str) -> StoreResult<Note> {
        let removed = self.store.delete(id)?;
        self.router.refresh(&self.store);
        Ok(removed)
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn router(&self) -> &Router<H, M, NoteStore<S>> {
        &self.router
    }

    pub fn mount(&self) -> &M {
        self.router.mount()
    }
}
