//! Views: pure functions from store state and route params to markup.
//!
//! Views only read. Mutations happen in host event handlers (`App`).

mod format;

pub use format::{escape_html, format_date_long, format_date_short, truncate};

use crate::model::note::Note;
use crate::router::RenderRequest;
use crate::storage::KeyValueStorage;
use crate::store::NoteStore;

/// Characters of content shown in a list item preview.
pub const PREVIEW_CHARS: usize = 150;

/// Form id the host submits for note creation.
pub const CREATE_FORM_ID: &str = "note-form";

pub fn header(current_path: &str) -> String {
    let active = |path: &str| {
        if current_path == path {
            " nav-link--active"
        } else {
            ""
        }
    };
    format!(
        r#"<header class="header">
  <div class="header__container">
    <h1 class="header__logo"><a href="/" data-link>📝 Notes</a></h1>
    <nav class="header__nav">
      <a href="/" data-link class="nav-link{home}">Home</a>
      <a href="/create" data-link class="nav-link{create}">Create Note</a>
    </nav>
  </div>
</header>"#,
        home = active("/"),
        create = active("/create"),
    )
}

pub fn note_item(note: &Note) -> String {
    let id = escape_html(note.id.as_str());
    format!(
        r#"<a href="/note/{id}" data-link class="note-item" data-note-id="{id}">
  <h3 class="note-item__title">{title}</h3>
  <time class="note-item__time" datetime="{datetime}">{date}</time>
  <p class="note-item__preview">{preview}</p>
</a>"#,
        title = escape_html(&note.title),
        datetime = escape_html(&note.timestamp),
        date = format_date_short(&note.timestamp),
        preview = escape_html(&truncate(&note.content, PREVIEW_CHARS)),
    )
}

pub fn note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return r#"<div class="note-list note-list--empty">
  <div class="empty-state">
    <span class="empty-state__icon">📝</span>
    <h2 class="empty-state__title">No notes yet</h2>
    <p class="empty-state__text">Create your first note to get started!</p>
    <a href="/create" data-link class="btn btn--primary">Create Note</a>
  </div>
</div>"#
            .to_string();
    }

    let items: String = notes.iter().map(note_item).collect();
    format!("<div class=\"note-list\">\n{items}\n</div>")
}

fn page(current_path: &str, body: &str) -> String {
    format!(
        "{header}\n<main class=\"main\">\n<div class=\"container\">\n{body}\n</div>\n</main>",
        header = header(current_path)
    )
}

/// `/`: every note, newest first.
pub fn home_view<S: KeyValueStorage>(store: &NoteStore<S>, request: &RenderRequest<'_>) -> String {
    let notes = store.get_all();
    let body = format!(
        r#"<div class="page-header">
  <h2 class="page-title">My Notes</h2>
  <a href="/create" data-link class="btn btn--primary">+ New Note</a>
</div>
{list}"#,
        list = note_list(&notes)
    );
    page(request.path, &body)
}

/// `/create`: the creation form.
pub fn create_view<S: KeyValueStorage>(
    _store: &NoteStore<S>,
    request: &RenderRequest<'_>,
) -> String {
    let body = format!(
        r#"<div class="create-note">
  <div class="create-note__container">
    <h2 class="create-note__title">Create New Note</h2>
    <form class="note-form" id="{CREATE_FORM_ID}">
      <div class="form-group">
        <label for="note-title" class="form-label">Title</label>
        <input type="text" id="note-title" class="form-input" placeholder="Enter note title..." required autofocus />
      </div>
      <div class="form-group">
        <label for="note-content" class="form-label">Content</label>
        <textarea id="note-content" class="form-textarea" placeholder="Write your note here..." rows="10" required></textarea>
      </div>
      <div class="form-actions">
        <button type="submit" class="btn btn--primary">Save Note</button>
        <a href="/" data-link class="btn btn--secondary">Cancel</a>
      </div>
    </form>
  </div>
</div>"#
    );
    page(request.path, &body)
}

/// `/note/:id`: one note, or an error state.
pub fn note_detail_view<S: KeyValueStorage>(
    store: &NoteStore<S>,
    request: &RenderRequest<'_>,
) -> String {
    let Some(note_id) = request.params.get("id") else {
        return page(
            request.path,
            &error_state("Invalid Note ID", None),
        );
    };

    let Some(note) = store.get_by_id(note_id) else {
        return page(
            request.path,
            &error_state(
                "Note Not Found",
                Some("The note you're looking for doesn't exist."),
            ),
        );
    };

    let body = format!(
        r#"<div class="note-detail">
  <div class="note-detail__header">
    <a href="/" data-link class="back-link">← Back to Notes</a>
  </div>
  <article class="note-detail__content">
    <h1 class="note-detail__title">{title}</h1>
    <time class="note-detail__time" datetime="{datetime}">{date}</time>
    <div class="note-detail__body">{body}</div>
  </article>
</div>"#,
        title = escape_html(&note.title),
        datetime = escape_html(&note.timestamp),
        date = format_date_long(&note.timestamp),
        body = escape_html(&note.content).replace('\n', "<br>"),
    );
    page(request.path, &body)
}

fn error_state(heading: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|text| format!("\n  <p>{}</p>", escape_html(text)))
        .unwrap_or_default();
    format!(
        r#"<div class="error-state">
  <h2>{heading}</h2>{detail}
  <a href="/" data-link class="btn btn--primary">Back to Home</a>
</div>"#
    )
}
