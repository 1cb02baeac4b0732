//! Screen controllers driving the note list, editor and detail views.
//!
//! # Responsibility
//! - Orchestrate store calls and markup conversion into use-case APIs.
//! - Keep presentation layers decoupled from storage details.
//!
//! # Invariants
//! - Controllers receive their store handle explicitly; there is no global
//!   persistence singleton.
//! - Store failures are returned to callers, never turned into panics.

pub mod diff;
pub mod note_detail;
pub mod note_editor;
pub mod notes_list;
pub mod notifier;
