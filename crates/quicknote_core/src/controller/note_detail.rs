//! Single-note detail controller.
//!
//! # Responsibility
//! - Present a stored note as an editable title and decoded body.
//! - Write edits back when a field loses focus.
//!
//! # Invariants
//! - Unchanged fields never trigger a store update.
//! - Only the title is trimmed before saving.
//! - A failed update leaves the held note untouched so a later attempt still
//!   sees the pending edit.

use crate::markup::{decode, StyledRun, StyledText};
use crate::model::note::Note;
use crate::repo::note_repo::{NoteStore, StoreError, StoreResult};
use log::{info, warn};

/// Controller behind the note detail screen.
pub struct NoteDetailController<S: NoteStore> {
    store: S,
    note: Note,
    title_field: String,
    body_field: StyledText,
    saved_body: StyledText,
}

impl<S: NoteStore> NoteDetailController<S> {
    /// Loads `note` into the title and body fields.
    ///
    /// A body that fails to decode is shown as its raw text.
    pub fn load(store: S, note: Note) -> Self {
        let body = display_body(&note);
        Self {
            store,
            title_field: note.title.clone(),
            body_field: body.clone(),
            saved_body: body,
            note,
        }
    }

    /// Last saved state of the note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn title(&self) -> &str {
        &self.title_field
    }

    pub fn body(&self) -> &StyledText {
        &self.body_field
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title_field = title.into();
    }

    pub fn set_body(&mut self, body: StyledText) {
        self.body_field = body;
    }

    pub fn append_checklist_item(&mut self) {
        self.body_field.append_checklist_item();
    }

    /// Title field lost focus; saves the trimmed title if it changed.
    ///
    /// A blank title is not saved; the field reverts to the stored title.
    /// Returns whether the store was updated.
    pub fn end_title_editing(&mut self) -> StoreResult<bool> {
        let trimmed = self.title_field.trim();
        if trimmed.is_empty() {
            self.title_field = self.note.title.clone();
            return Ok(false);
        }
        if trimmed == self.note.title {
            self.title_field = self.note.title.clone();
            return Ok(false);
        }

        let mut updated = self.note.clone();
        updated.title = trimmed.to_string();
        self.save(updated)?;
        self.title_field = self.note.title.clone();
        Ok(true)
    }

    /// Body field lost focus; saves the re-encoded body if it changed.
    ///
    /// Returns whether the store was updated.
    pub fn end_body_editing(&mut self) -> StoreResult<bool> {
        if self.body_field == self.saved_body {
            return Ok(false);
        }

        let mut updated = self.note.clone();
        updated.body = self.body_field.to_markup();
        self.save(updated)?;
        self.saved_body = self.body_field.clone();
        Ok(true)
    }

    /// Re-reads the note from the store, discarding unsaved field edits.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when the note was deleted meanwhile.
    pub fn reload(&mut self) -> StoreResult<()> {
        let note = self
            .store
            .get(self.note.id)?
            .ok_or(StoreError::NotFound(self.note.id))?;
        let body = display_body(&note);
        self.title_field = note.title.clone();
        self.body_field = body.clone();
        self.saved_body = body;
        self.note = note;
        Ok(())
    }

    fn save(&mut self, updated: Note) -> StoreResult<()> {
        if let Err(err) = self.store.update(&updated) {
            warn!(
                "event=note_update module=note_detail status=error note_id={} error={err}",
                updated.id
            );
            return Err(err);
        }

        info!(
            "event=note_update module=note_detail status=ok note_id={}",
            updated.id
        );
        self.note = updated;
        Ok(())
    }
}

fn display_body(note: &Note) -> StyledText {
    decode(&note.body)
        .unwrap_or_else(|| StyledText::from_runs([StyledRun::plain(note.body.clone())]))
}
