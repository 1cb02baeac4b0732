//! New-note editor controller.
//!
//! # Invariants
//! - A blank title is rejected before the store is touched.
//! - Exactly one insert and one "note added" notification per successful
//!   submit.

use crate::markup::{encode, StyledRun};
use crate::model::note::Note;
use crate::repo::note_repo::{NoteStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User input that cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Failure of [`NoteEditor::submit`].
#[derive(Debug)]
pub enum EditorError {
    Validation(ValidationError),
    Store(StoreError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for EditorError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for EditorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

type NoteAddedListener<'a> = Box<dyn FnMut(&Note) + 'a>;

/// Controller behind the "add note" screen.
///
/// The listener may borrow anything that outlives the editor, such as a
/// list controller sharing the same store.
pub struct NoteEditor<'a, S: NoteStore> {
    store: S,
    on_note_added: Option<NoteAddedListener<'a>>,
}

impl<'a, S: NoteStore> NoteEditor<'a, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            on_note_added: None,
        }
    }

    /// Registers the collaborator told about each saved note.
    pub fn on_note_added(&mut self, listener: impl FnMut(&Note) + 'a) {
        self.on_note_added = Some(Box::new(listener));
    }

    /// Validates, encodes and stores a new note.
    ///
    /// The title is stored trimmed.
    ///
    /// # Errors
    /// - `EditorError::Validation` for a blank title (no store call made).
    /// - `EditorError::Store` when the insert fails.
    pub fn submit(&mut self, title: &str, body: &[StyledRun]) -> Result<Note, EditorError> {
        let title = validate_title(title)?;
        let markup = encode(body);

        let note = match self.store.insert(title, &markup) {
            Ok(note) => note,
            Err(err) => {
                warn!("event=note_submit module=note_editor status=error error={err}");
                return Err(err.into());
            }
        };

        info!(
            "event=note_submit module=note_editor status=ok note_id={} body_len={}",
            note.id,
            note.body.len()
        );
        if let Some(listener) = self.on_note_added.as_mut() {
            listener(&note);
        }
        Ok(note)
    }

    /// Submits an unstyled body.
    pub fn submit_plain(&mut self, title: &str, body: &str) -> Result<Note, EditorError> {
        self.submit(title, &[StyledRun::plain(body)])
    }
}

/// Returns the trimmed title, or `EmptyTitle` when nothing is left.
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed)
}
