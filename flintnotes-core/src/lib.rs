//! Core library for Flintnotes — a local-first personal note-taking application.
//!
//! The primary entry point is [`NoteStore`], which owns the SQLite database
//! behind a note collection. All note reads and mutations go through
//! `NoteStore` methods; bulk JSON import/export lives in [`crate::core::export`]
//! and operates on a store by reference.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    error::{FlintnotesError, Result},
    export::{export_notes, import_notes, ImportSummary},
    note::Note,
    storage::Storage,
    store::NoteStore,
};
