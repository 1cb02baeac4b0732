//! Core domain logic for QuickNote.
//! Notes live in a local SQLite store; screens talk to it through controllers.

pub mod controller;
pub mod db;
pub mod logging;
pub mod markup;
pub mod model;
pub mod repo;

pub use controller::diff::{diff_notes, NotesDiff};
pub use controller::note_detail::NoteDetailController;
pub use controller::note_editor::{validate_title, EditorError, NoteEditor, ValidationError};
pub use controller::notes_list::{NotesListController, NotesPayload, NotesViewState};
pub use controller::notifier::StateNotifier;
pub use logging::{default_log_level, init_logging, logging_status};
pub use markup::{
    append_checklist_item, checklist_items, decode, decode_bytes, encode, try_decode,
    DecodeError, StyledRun, StyledText, CHECKLIST_MARKER,
};
pub use model::note::{Note, NoteId};
pub use model::view_state::ViewState;
pub use repo::note_repo::{NoteStore, SqliteNoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
