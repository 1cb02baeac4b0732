mod common;

use common::CountingStore;
use quicknote_core::db::open_db_in_memory;
use quicknote_core::{
    NoteStore, NotesListController, NotesPayload, NotesViewState, SqliteNoteStore, ViewState,
};
use std::cell::RefCell;
use std::rc::Rc;

type Seen = Rc<RefCell<Vec<String>>>;

fn record_states<S: NoteStore>(controller: &mut NotesListController<'_, S>) -> Seen {
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    controller.on_view_state_change(move |state: &NotesViewState| {
        let label = match state {
            ViewState::Empty => "empty".to_string(),
            ViewState::Loading => "loading".to_string(),
            ViewState::Ready(NotesPayload::GetNotes) => "ready".to_string(),
            ViewState::Error(err) => format!("error: {err}"),
        };
        sink.borrow_mut().push(label);
    });
    seen
}

#[test]
fn starts_empty_without_notifications() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let mut controller = NotesListController::new(&store);
    let seen = record_states(&mut controller);

    assert!(matches!(controller.view_state(), ViewState::Empty));
    assert!(controller.is_empty());
    assert!(!controller.dispatch_pending());
    assert!(seen.borrow().is_empty());
}

#[test]
fn fetch_notes_moves_to_ready_and_notifies_once_on_dispatch() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    store.insert("one", "").unwrap();
    store.insert("two", "").unwrap();

    let mut controller = NotesListController::new(&store);
    let seen = record_states(&mut controller);

    controller.fetch_notes();
    assert!(seen.borrow().is_empty(), "setter must not notify inline");
    assert!(controller.view_state().is_ready());
    assert_eq!(controller.len(), 2);
    assert_eq!(controller.note_at(1).map(|note| note.title.as_str()), Some("two"));
    assert!(controller.note_at(2).is_none());

    assert!(controller.dispatch_pending());
    assert!(!controller.dispatch_pending());
    assert_eq!(*seen.borrow(), vec!["ready".to_string()]);
}

#[test]
fn failed_fetch_sets_error_state_and_keeps_cache() {
    let conn = open_db_in_memory().unwrap();
    let inner = SqliteNoteStore::try_new(&conn).unwrap();
    inner.insert("cached", "").unwrap();
    let store = CountingStore::new(inner);

    let mut controller = NotesListController::new(&store);
    let seen = record_states(&mut controller);
    controller.fetch_notes();
    controller.dispatch_pending();

    store.set_failing(true);
    controller.fetch_notes();
    controller.dispatch_pending();

    assert!(controller.view_state().error().is_some());
    assert_eq!(controller.len(), 1);
    assert_eq!(
        *seen.borrow(),
        vec![
            "ready".to_string(),
            "error: invalid persisted note data: injected failure".to_string()
        ]
    );
}

#[test]
fn delete_note_refetches_and_leaves_other_notes_untouched() {
    let conn = open_db_in_memory().unwrap();
    let inner = SqliteNoteStore::try_new(&conn).unwrap();
    let keep = inner.insert("keep", "<b>bold</b>").unwrap();
    let doomed = inner.insert("doomed", "").unwrap();
    let store = CountingStore::new(inner);

    let mut controller = NotesListController::new(&store);
    controller.fetch_notes();
    assert_eq!(controller.len(), 2);

    controller.delete_note(&doomed).unwrap();
    assert_eq!(store.deletes.get(), 1);
    assert_eq!(store.fetches.get(), 2);
    assert_eq!(controller.notes(), &[keep]);
    assert_eq!(controller.last_diff().removed, vec![doomed.id]);
    assert!(controller.view_state().is_ready());
}

#[test]
fn failed_delete_returns_error_without_state_change() {
    let conn = open_db_in_memory().unwrap();
    let inner = SqliteNoteStore::try_new(&conn).unwrap();
    let note = inner.insert("note", "").unwrap();
    let store = CountingStore::new(inner);

    let mut controller = NotesListController::new(&store);
    controller.fetch_notes();
    controller.dispatch_pending();

    store.set_failing(true);
    assert!(controller.delete_note(&note).is_err());
    assert!(controller.view_state().is_ready());
    assert_eq!(controller.len(), 1);
    assert_eq!(store.fetches.get(), 1);
}

#[test]
fn note_added_refreshes_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let mut controller = NotesListController::new(&store);
    controller.fetch_notes();
    assert!(controller.is_empty());

    let added = store.insert("fresh", "").unwrap();
    controller.note_added(&added);
    assert_eq!(controller.notes(), &[added.clone()]);
    assert_eq!(controller.last_diff().inserted, vec![added.id]);
}
