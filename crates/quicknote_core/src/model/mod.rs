//! Domain model for notes and screen presentation state.
//!
//! # Responsibility
//! - Define the persisted `Note` record shared by store and controllers.
//! - Define the `ViewState` sum type rendered by list-driven screens.
//!
//! # Invariants
//! - Every note is identified by a store-assigned `NoteId`.
//! - Controllers only hold transient copies; the store owns the records.

pub mod note;
pub mod view_state;
