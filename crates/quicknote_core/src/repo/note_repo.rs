//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide fetch-all/get/insert/update/delete over the `notes` table.
//! - Assign note identity and creation time on insert.
//!
//! # Invariants
//! - `fetch_all` returns notes in creation order (`created_at`, then rowid).
//! - Each write is one autocommitted statement.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    body,
    created_at
FROM notes";

const NOTE_COLUMNS: [&str; 5] = ["uuid", "title", "body", "created_at", "updated_at"];

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure surfaced to controllers and the UI layer.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "database is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable keyed storage of notes.
///
/// Implemented for `&S` so several controllers of one screen can share a
/// single store handle by reference.
pub trait NoteStore {
    /// Returns every stored note in store order.
    fn fetch_all(&self) -> StoreResult<Vec<Note>>;
    /// Loads one note by identity.
    fn get(&self, id: NoteId) -> StoreResult<Option<Note>>;
    /// Persists a new note and returns it with assigned id and timestamp.
    fn insert(&self, title: &str, body: &str) -> StoreResult<Note>;
    /// Overwrites title and body of an existing note.
    fn update(&self, note: &Note) -> StoreResult<()>;
    /// Removes a note permanently.
    fn delete(&self, note: &Note) -> StoreResult<()>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn fetch_all(&self) -> StoreResult<Vec<Note>> {
        (**self).fetch_all()
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        (**self).get(id)
    }

    fn insert(&self, title: &str, body: &str) -> StoreResult<Note> {
        (**self).insert(title, body)
    }

    fn update(&self, note: &Note) -> StoreResult<()> {
        (**self).update(note)
    }

    fn delete(&self, note: &Note) -> StoreResult<()> {
        (**self).delete(note)
    }
}

/// SQLite-backed note store.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the connection
    ///   was not opened through [`crate::db::open_db`].
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn fetch_all(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        debug!(
            "event=note_fetch_all module=store status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    fn get(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, title: &str, body: &str) -> StoreResult<Note> {
        let note = Note::new(Uuid::new_v4(), title, body, now_epoch_ms());

        self.conn.execute(
            "INSERT INTO notes (
                uuid,
                title,
                body,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?4);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.body.as_str(),
                note.created,
            ],
        )?;

        debug!(
            "event=note_insert module=store status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    fn update(&self, note: &Note) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                body = ?3,
                updated_at = ?4
             WHERE uuid = ?1;",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.body.as_str(),
                now_epoch_ms(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(note.id));
        }

        debug!(
            "event=note_update module=store status=ok note_id={}",
            note.id
        );
        Ok(())
    }

    fn delete(&self, note: &Note) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [note.id.to_string()])?;

        if changed == 0 {
            return Err(StoreError::NotFound(note.id));
        }

        debug!(
            "event=note_delete module=store status=ok note_id={}",
            note.id
        );
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    Ok(Note {
        id,
        title: row.get("title")?,
        body: row.get("body")?,
        created: row.get("created_at")?,
    })
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(StoreError::MissingRequiredTable("notes"));
    }

    for column in NOTE_COLUMNS {
        if !table_has_column(conn, "notes", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
