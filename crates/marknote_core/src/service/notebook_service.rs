//! Notebook use-case service.
//!
//! # Responsibility
//! - Expose the six mutations plus hydrated/filtered/lookup reads as one
//!   surface for presentation code.
//! - Cache the hydrated view, recomputing only when a raw collection's
//!   version changes.
//!
//! # Invariants
//! - The cache is derived data only; it never feeds back into storage.
//! - Cache identity is `(notes_version, tags_version)`; any successful
//!   mutation invalidates it implicitly by bumping a version.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::tag::{Tag, TagId};
use crate::repo::notebook_repo::{NotebookRepository, RepoResult};
use crate::store::KeyValueStore;
use crate::view::composer;

/// Façade over the repository and view composer.
///
/// Holds the memoized hydrated view so repeated listing reads between
/// mutations cost one clone, not one join.
pub struct NotebookService<S: KeyValueStore> {
    repo: NotebookRepository<S>,
    hydrated: Vec<Note>,
    hydrated_versions: (u64, u64),
}

impl<S: KeyValueStore> NotebookService<S> {
    /// Opens the repository from the given store and primes the view cache.
    pub fn open(store: S) -> RepoResult<Self> {
        let repo = NotebookRepository::open(store)?;
        let hydrated = composer::hydrate(repo.raw_notes(), repo.tags());
        let hydrated_versions = (repo.notes_version(), repo.tags_version());
        Ok(Self {
            repo,
            hydrated,
            hydrated_versions,
        })
    }

    /// Creates a note from draft data and returns its fresh id.
    pub fn create_note(&mut self, draft: &NoteDraft) -> RepoResult<NoteId> {
        self.repo.create_note(draft)
    }

    /// Replaces a note's content; silent no-op for an unknown id.
    pub fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> RepoResult<()> {
        self.repo.update_note(id, draft)
    }

    /// Deletes a note; silent no-op for an unknown id.
    pub fn delete_note(&mut self, id: NoteId) -> RepoResult<()> {
        self.repo.delete_note(id)
    }

    /// Adds a tag (inline creation path included; see [`Tag::new`]).
    pub fn add_tag(&mut self, tag: Tag) -> RepoResult<()> {
        self.repo.add_tag(tag)
    }

    /// Renames a tag everywhere at once; silent no-op for an unknown id.
    pub fn update_tag(&mut self, id: TagId, label: &str) -> RepoResult<()> {
        self.repo.update_tag(id, label)
    }

    /// Deletes a tag; referencing notes keep a dangling id that hydration
    /// filters out.
    pub fn delete_tag(&mut self, id: TagId) -> RepoResult<()> {
        self.repo.delete_tag(id)
    }

    /// Returns all tags for selection widgets, in insertion order.
    pub fn tags(&self) -> &[Tag] {
        self.repo.tags()
    }

    /// Returns the hydrated view, recomputing only when stale.
    pub fn notes_with_tags(&mut self) -> &[Note] {
        let versions = (self.repo.notes_version(), self.repo.tags_version());
        if versions != self.hydrated_versions {
            self.hydrated = composer::hydrate(self.repo.raw_notes(), self.repo.tags());
            self.hydrated_versions = versions;
        }
        &self.hydrated
    }

    /// Returns the hydrated notes matching a title query and tag set.
    pub fn filtered_notes(&mut self, title_query: &str, required_tags: &[Tag]) -> Vec<Note> {
        let notes = self.notes_with_tags();
        composer::filter(notes, title_query, required_tags)
    }

    /// Looks up one hydrated note for detail/edit views.
    ///
    /// `None` means the caller should redirect to the default listing.
    pub fn find_note(&mut self, id: NoteId) -> Option<Note> {
        composer::find_note_by_id(self.notes_with_tags(), id).cloned()
    }

    /// Final flush on teardown; a no-op safety net since every mutation
    /// already persisted synchronously.
    pub fn close(mut self) -> RepoResult<S> {
        self.repo.flush()?;
        Ok(self.repo.into_store())
    }
}
