#![allow(dead_code)]

use quicknote_core::{Note, NoteId, NoteStore, StoreError, StoreResult};
use std::cell::Cell;

/// Wraps a store, counting calls and optionally failing every operation.
pub struct CountingStore<S> {
    inner: S,
    pub fetches: Cell<usize>,
    pub inserts: Cell<usize>,
    pub updates: Cell<usize>,
    pub deletes: Cell<usize>,
    fail: Cell<bool>,
}

impl<S: NoteStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetches: Cell::new(0),
            inserts: Cell::new(0),
            updates: Cell::new(0),
            deletes: Cell::new(0),
            fail: Cell::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail.get() {
            return Err(StoreError::InvalidData("injected failure".to_string()));
        }
        Ok(())
    }
}

impl<S: NoteStore> NoteStore for CountingStore<S> {
    fn fetch_all(&self) -> StoreResult<Vec<Note>> {
        self.fetches.set(self.fetches.get() + 1);
        self.check()?;
        self.inner.fetch_all()
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        self.check()?;
        self.inner.get(id)
    }

    fn insert(&self, title: &str, body: &str) -> StoreResult<Note> {
        self.inserts.set(self.inserts.get() + 1);
        self.check()?;
        self.inner.insert(title, body)
    }

    fn update(&self, note: &Note) -> StoreResult<()> {
        self.updates.set(self.updates.get() + 1);
        self.check()?;
        self.inner.update(note)
    }

    fn delete(&self, note: &Note) -> StoreResult<()> {
        self.deletes.set(self.deletes.get() + 1);
        self.check()?;
        self.inner.delete(note)
    }
}
