//! Note store contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define the narrow persistence contract controllers depend on.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Store APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Failures propagate immediately; nothing here retries.

pub mod note_repo;
