//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `quicknote_core` linkage without the Flutter runtime.
//! - Optionally list the notes of a database file: `quicknote_cli <db-path>`.

use quicknote_core::db::open_db;
use quicknote_core::{decode, NotesListController, SqliteNoteStore, ViewState};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("quicknote_core ping={}", quicknote_core::ping());
    println!("quicknote_core version={}", quicknote_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match list_notes(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("quicknote_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn list_notes(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("open `{db_path}` failed: {err}"))?;
    let store = SqliteNoteStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut list = NotesListController::new(&store);
    list.fetch_notes();

    if let ViewState::Error(err) = list.view_state() {
        return Err(format!("fetch failed: {err}"));
    }

    println!("notes={}", list.len());
    for note in list.notes() {
        let preview = decode(&note.body)
            .map(|body| body.plain_text().replace('\n', " / "))
            .unwrap_or_default();
        println!("{} {} | {}", note.id, note.title, preview);
    }
    Ok(())
}
