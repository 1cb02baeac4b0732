//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note list, editor and detail use-cases to Dart via FRB.
//! - Translate core errors into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the configured database, so calls are independent.

use log::warn;
use quicknote_core::db::open_db;
use quicknote_core::{
    append_checklist_item, core_version as core_version_inner, decode,
    init_logging as init_logging_inner, ping as ping_inner, Note, NoteDetailController,
    NoteEditor, NoteId, NoteStore, NotesListController, SqliteNoteStore, StyledRun, StyledText,
    ViewState,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "quicknote.sqlite3";
const DB_PATH_ENV: &str = "QUICKNOTE_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// Must run before the first note call; afterwards only the already active
/// path is accepted. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }

    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One styled span as sent by the Dart editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// Note projection returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Stable note ID in string form.
    pub id: String,
    pub title: String,
    /// Stored markup body.
    pub body: String,
    pub created_epoch_ms: i64,
}

/// Response envelope for the notes list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Response envelope for single-note actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    pub note: Option<NoteItem>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note: Option<NoteItem>) -> Self {
        Self {
            ok: true,
            note,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

/// Fetches every note in store order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_fetch() -> NotesResponse {
    let result = with_store(|store| {
        let mut list = NotesListController::new(store);
        list.fetch_notes();
        match list.view_state() {
            ViewState::Error(err) => Err(err.to_string()),
            _ => Ok(list.notes().iter().map(to_note_item).collect::<Vec<_>>()),
        }
    });

    match result {
        Ok(items) => NotesResponse {
            ok: true,
            message: format!("Loaded {} note(s).", items.len()),
            items,
        },
        Err(err) => NotesResponse {
            ok: false,
            items: Vec::new(),
            message: format!("notes_fetch failed: {err}"),
        },
    }
}

/// Saves a new note from editor input.
#[flutter_rust_bridge::frb(sync)]
pub fn note_submit(title: String, body: Vec<BodyRun>) -> NoteActionResponse {
    let runs = to_styled_runs(body);
    let result = with_store(|store| {
        let mut editor = NoteEditor::new(store);
        editor
            .submit(title.as_str(), &runs)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(note) => NoteActionResponse::success("Note saved.", Some(to_note_item(&note))),
        Err(err) => NoteActionResponse::failure(format!("note_submit failed: {err}")),
    }
}

/// Loads one note by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(id: String) -> NoteActionResponse {
    let result = with_store(|store| {
        let note_id = parse_note_id(&id)?;
        store.get(note_id).map_err(|err| err.to_string())
    });

    match result {
        Ok(Some(note)) => NoteActionResponse::success("Note loaded.", Some(to_note_item(&note))),
        Ok(None) => NoteActionResponse::failure(format!("note_get failed: note not found: {id}")),
        Err(err) => NoteActionResponse::failure(format!("note_get failed: {err}")),
    }
}

/// Applies detail-screen edits; unchanged fields are not written.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(id: String, title: String, body: Vec<BodyRun>) -> NoteActionResponse {
    let runs = to_styled_runs(body);
    let result = with_store(|store| {
        let note = load_note(store, &id)?;
        let mut detail = NoteDetailController::load(store, note);
        detail.set_title(title.as_str());
        detail.set_body(StyledText::from_runs(runs));
        let title_saved = detail.end_title_editing().map_err(|err| err.to_string())?;
        let body_saved = detail.end_body_editing().map_err(|err| err.to_string())?;
        Ok((detail.note().clone(), title_saved || body_saved))
    });

    match result {
        Ok((note, true)) => NoteActionResponse::success("Note updated.", Some(to_note_item(&note))),
        Ok((note, false)) => NoteActionResponse::success("No changes.", Some(to_note_item(&note))),
        Err(err) => NoteActionResponse::failure(format!("note_update failed: {err}")),
    }
}

/// Deletes one note by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: String) -> NoteActionResponse {
    let result = with_store(|store| {
        let note = load_note(store, &id)?;
        let mut list = NotesListController::new(store);
        list.delete_note(&note).map_err(|err| err.to_string())
    });

    match result {
        Ok(()) => NoteActionResponse::success("Note deleted.", None),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Appends a checklist bullet to plain editor text.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_append(body: String) -> String {
    append_checklist_item(body.as_str())
}

/// Decodes a stored body for display; `None` when the markup is malformed.
#[flutter_rust_bridge::frb(sync)]
pub fn body_decode(markup: String) -> Option<Vec<BodyRun>> {
    decode(markup.as_str()).map(|text| {
        text.into_runs()
            .into_iter()
            .map(|run| BodyRun {
                text: run.text,
                bold: run.bold,
                italic: run.italic,
            })
            .collect()
    })
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&SqliteNoteStore<'_>) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    let store =
        SqliteNoteStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    f(&store)
}

fn load_note(store: &SqliteNoteStore<'_>, id: &str) -> Result<Note, String> {
    let note_id = parse_note_id(id)?;
    store
        .get(note_id)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("note not found: {id}"))
}

fn parse_note_id(id: &str) -> Result<NoteId, String> {
    NoteId::parse_str(id.trim()).map_err(|_| format!("invalid note id `{id}`"))
}

fn to_styled_runs(body: Vec<BodyRun>) -> Vec<StyledRun> {
    body.into_iter()
        .map(|run| StyledRun::new(run.text, run.bold, run.italic))
        .collect()
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        body: note.body.clone(),
        created_epoch_ms: note.created,
    }
}
