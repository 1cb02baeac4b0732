//! Notes list screen controller.
//!
//! # Responsibility
//! - Cache the fetched notes for list rendering.
//! - Drive `ViewState` transitions and notify the renderer.
//! - Delete notes and refresh after the editor adds one.
//!
//! # Invariants
//! - Starts in `ViewState::Empty`.
//! - Every state assignment schedules exactly one notification; delivery
//!   waits for `dispatch_pending`.
//! - A failed fetch keeps the previously cached notes.

use crate::controller::diff::{diff_notes, NotesDiff};
use crate::controller::notifier::StateNotifier;
use crate::model::note::Note;
use crate::model::view_state::ViewState;
use crate::repo::note_repo::{NoteStore, StoreError, StoreResult};
use log::{debug, info, warn};

/// Success payload of the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesPayload {
    /// Notes were fetched and the cache is current.
    GetNotes,
}

pub type NotesViewState = ViewState<NotesPayload, StoreError>;

/// Controller behind the notes list screen.
pub struct NotesListController<'a, S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    last_diff: NotesDiff,
    notifier: StateNotifier<'a, NotesViewState>,
}

impl<'a, S: NoteStore> NotesListController<'a, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notes: Vec::new(),
            last_diff: NotesDiff::default(),
            notifier: StateNotifier::new(ViewState::Empty),
        }
    }

    /// Registers the renderer callback, replacing any previous one.
    pub fn on_view_state_change(&mut self, observer: impl FnMut(&NotesViewState) + 'a) {
        self.notifier.subscribe(observer);
    }

    pub fn clear_view_state_observer(&mut self) {
        self.notifier.unsubscribe();
    }

    /// Delivers the latest state change to the renderer, if any.
    ///
    /// Called from the rendering context, never from inside a state change.
    pub fn dispatch_pending(&mut self) -> bool {
        self.notifier.dispatch_pending()
    }

    pub fn view_state(&self) -> &NotesViewState {
        self.notifier.state()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_at(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Changes applied to the cache by the last successful fetch.
    pub fn last_diff(&self) -> &NotesDiff {
        &self.last_diff
    }

    /// Reloads all notes from the store.
    ///
    /// Moves to `Ready(GetNotes)` on success and `Error(reason)` on failure.
    pub fn fetch_notes(&mut self) {
        match self.store.fetch_all() {
            Ok(notes) => {
                self.last_diff = diff_notes(&self.notes, &notes);
                self.notes = notes;
                info!(
                    "event=notes_fetch module=notes_list status=ok count={} inserted={} removed={} reconfigured={}",
                    self.notes.len(),
                    self.last_diff.inserted.len(),
                    self.last_diff.removed.len(),
                    self.last_diff.reconfigured.len()
                );
                self.notifier.set(ViewState::Ready(NotesPayload::GetNotes));
            }
            Err(err) => {
                warn!("event=notes_fetch module=notes_list status=error error={err}");
                self.notifier.set(ViewState::Error(err));
            }
        }
    }

    /// Deletes `note` through the store, then refreshes the list.
    ///
    /// # Errors
    /// - Returns the store error when the delete fails; state and cache are
    ///   left untouched in that case.
    pub fn delete_note(&mut self, note: &Note) -> StoreResult<()> {
        if let Err(err) = self.store.delete(note) {
            warn!(
                "event=note_delete module=notes_list status=error note_id={} error={err}",
                note.id
            );
            return Err(err);
        }

        self.fetch_notes();
        Ok(())
    }

    /// Refreshes after the editor reports a newly added note.
    pub fn note_added(&mut self, note: &Note) {
        debug!(
            "event=note_added module=notes_list status=ok note_id={}",
            note.id
        );
        self.fetch_notes();
    }
}
