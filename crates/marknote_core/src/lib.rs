//! Core domain logic for MarkNote, a local-first markdown note keeper.
//!
//! This crate is the single source of truth for the note/tag model, its
//! derived views, and the persistence contract. Presentation concerns
//! (forms, routing, markdown rendering) live outside this crate and talk to
//! it through [`NotebookService`].

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, RawNote};
pub use model::tag::{Tag, TagId};
pub use repo::notebook_repo::{NotebookRepository, RepoError, RepoResult};
pub use service::notebook_service::NotebookService;
pub use store::{KeyValueStore, Persisted, SqliteKeyValueStore, StoreError, NOTES_KEY, TAGS_KEY};
pub use view::composer::{filter, find_note_by_id, hydrate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
