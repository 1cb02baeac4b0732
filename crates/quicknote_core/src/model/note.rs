//! Note domain model.
//!
//! # Invariants
//! - `id` and `created` are assigned by the store on insert and never change.
//! - `title` is non-empty once saved; the editor enforces this, not the store.
//! - `body` holds markup produced by [`crate::markup::encode`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identity of a note.
pub type NoteId = Uuid;

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Markup body (`<b>`, `<i>`, literal newlines, `○ ` checklist bullets).
    pub body: String,
    /// Unix epoch milliseconds.
    pub created: i64,
}

impl Note {
    /// Builds a note with identity and timestamp already known.
    ///
    /// Used by the store when materializing rows; callers creating new notes
    /// go through `NoteStore::insert` instead.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        created: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            created,
        }
    }
}
