//! Identity-based diff between two note list snapshots.

use crate::model::note::{Note, NoteId};
use std::collections::{HashMap, HashSet};

/// Changes between a previous and a current list of notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesDiff {
    /// Ids present only in the current list, in current order.
    pub inserted: Vec<NoteId>,
    /// Ids present only in the previous list, in previous order.
    pub removed: Vec<NoteId>,
    /// Ids present in both whose title, body or timestamp changed.
    pub reconfigured: Vec<NoteId>,
}

impl NotesDiff {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty() && self.reconfigured.is_empty()
    }
}

pub fn diff_notes(previous: &[Note], current: &[Note]) -> NotesDiff {
    let before: HashMap<NoteId, &Note> = previous.iter().map(|note| (note.id, note)).collect();
    let after: HashSet<NoteId> = current.iter().map(|note| note.id).collect();

    let mut diff = NotesDiff::default();
    for note in current {
        match before.get(&note.id) {
            None => diff.inserted.push(note.id),
            Some(old) if *old != note => diff.reconfigured.push(note.id),
            Some(_) => {}
        }
    }
    diff.removed = previous
        .iter()
        .filter(|note| !after.contains(&note.id))
        .map(|note| note.id)
        .collect();
    diff
}
