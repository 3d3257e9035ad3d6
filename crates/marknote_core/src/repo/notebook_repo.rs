//! Note/tag repository over the key-value persistence port.
//!
//! # Responsibility
//! - Expose the six mutations (note create/update/delete, tag
//!   add/update/delete) over the two persisted collections.
//! - Keep version counters for downstream view memoization.
//!
//! # Invariants
//! - Each mutation serializes and writes the whole affected collection before
//!   the in-memory collection changes (write-then-commit).
//! - `delete_tag` never rewrites any note's `tag_ids`; dangling references
//!   are resolved away at hydration time.
//! - Version counters bump only on a successful persist.

use crate::model::note::{NoteDraft, NoteId, RawNote};
use crate::model::tag::{Tag, TagId};
use crate::store::{KeyValueStore, Persisted, StoreError, NOTES_KEY, TAGS_KEY};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error: every failure here is a persistence failure.
///
/// Missing ids are not errors (silent no-op by contract), and content is
/// never validated at this layer.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owns the raw notes and tags collections behind an injected storage port.
///
/// The hydrated view never lives here; see [`crate::view`] for derivation.
#[derive(Debug)]
pub struct NotebookRepository<S: KeyValueStore> {
    store: S,
    notes: Persisted<Vec<RawNote>>,
    tags: Persisted<Vec<Tag>>,
    notes_version: u64,
    tags_version: u64,
}

impl<S: KeyValueStore> NotebookRepository<S> {
    /// Loads both collections from the store, binding empty defaults when the
    /// keys are absent (first launch writes nothing until the first
    /// mutation).
    ///
    /// # Errors
    /// - `StoreError::Corrupt` when either stored value fails to decode; the
    ///   stored bytes are preserved for recovery.
    pub fn open(store: S) -> RepoResult<Self> {
        let notes = Persisted::load(&store, NOTES_KEY, Vec::new())?;
        let tags = Persisted::load(&store, TAGS_KEY, Vec::new())?;
        info!(
            "event=repo_open module=repo status=ok notes={} tags={}",
            notes.get().len(),
            tags.get().len()
        );
        Ok(Self {
            store,
            notes,
            tags,
            notes_version: 0,
            tags_version: 0,
        })
    }

    /// Returns the raw notes collection, the single source of truth.
    pub fn raw_notes(&self) -> &[RawNote] {
        self.notes.get()
    }

    /// Returns the tags collection in insertion order.
    pub fn tags(&self) -> &[Tag] {
        self.tags.get()
    }

    /// Version of the notes collection; bumps on each successful mutation.
    pub fn notes_version(&self) -> u64 {
        self.notes_version
    }

    /// Version of the tags collection; bumps on each successful mutation.
    pub fn tags_version(&self) -> u64 {
        self.tags_version
    }

    /// Appends a new note with a fresh id, projecting draft tags to ids.
    ///
    /// Empty title/body are accepted; validation is a presentation concern.
    pub fn create_note(&mut self, draft: &NoteDraft) -> RepoResult<NoteId> {
        let note = RawNote::from_draft(draft);
        let id = note.id;
        self.notes.update(&mut self.store, |prev| {
            let mut next = prev.clone();
            next.push(note);
            next
        })?;
        self.notes_version += 1;
        info!("event=note_create module=repo status=ok id={id}");
        Ok(id)
    }

    /// Replaces title/body/tag ids of the note with matching id.
    ///
    /// Silent no-op when no note has this id; the collection (and its stored
    /// form) is left exactly as it was.
    pub fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> RepoResult<()> {
        if !self.notes.get().iter().any(|note| note.id == id) {
            info!("event=note_update module=repo status=noop id={id}");
            return Ok(());
        }

        self.notes.update(&mut self.store, |prev| {
            prev.iter()
                .map(|note| {
                    if note.id == id {
                        RawNote {
                            id: note.id,
                            title: draft.title.clone(),
                            body: draft.body.clone(),
                            tag_ids: draft.tag_ids(),
                        }
                    } else {
                        note.clone()
                    }
                })
                .collect()
        })?;
        self.notes_version += 1;
        info!("event=note_update module=repo status=ok id={id}");
        Ok(())
    }

    /// Removes the note with matching id; silent no-op when absent.
    pub fn delete_note(&mut self, id: NoteId) -> RepoResult<()> {
        if !self.notes.get().iter().any(|note| note.id == id) {
            info!("event=note_delete module=repo status=noop id={id}");
            return Ok(());
        }

        self.notes.update(&mut self.store, |prev| {
            prev.iter()
                .filter(|note| note.id != id)
                .cloned()
                .collect()
        })?;
        self.notes_version += 1;
        info!("event=note_delete module=repo status=ok id={id}");
        Ok(())
    }

    /// Appends a tag with a caller-supplied id and label.
    ///
    /// No dedup: two tags with the same label but different ids may coexist.
    pub fn add_tag(&mut self, tag: Tag) -> RepoResult<()> {
        let id = tag.id;
        self.tags.update(&mut self.store, |prev| {
            let mut next = prev.clone();
            next.push(tag);
            next
        })?;
        self.tags_version += 1;
        info!("event=tag_add module=repo status=ok id={id}");
        Ok(())
    }

    /// Replaces the label of the tag with matching id; no-op when absent.
    pub fn update_tag(&mut self, id: TagId, label: &str) -> RepoResult<()> {
        if !self.tags.get().iter().any(|tag| tag.id == id) {
            info!("event=tag_update module=repo status=noop id={id}");
            return Ok(());
        }

        self.tags.update(&mut self.store, |prev| {
            prev.iter()
                .map(|tag| {
                    if tag.id == id {
                        Tag::with_id(tag.id, label)
                    } else {
                        tag.clone()
                    }
                })
                .collect()
        })?;
        self.tags_version += 1;
        info!("event=tag_update module=repo status=ok id={id}");
        Ok(())
    }

    /// Removes the tag with matching id; silent no-op when absent.
    ///
    /// Notes referencing the id keep their now-dangling reference; hydration
    /// filters it out on the next read.
    pub fn delete_tag(&mut self, id: TagId) -> RepoResult<()> {
        if !self.tags.get().iter().any(|tag| tag.id == id) {
            info!("event=tag_delete module=repo status=noop id={id}");
            return Ok(());
        }

        self.tags.update(&mut self.store, |prev| {
            prev.iter().filter(|tag| tag.id != id).cloned().collect()
        })?;
        self.tags_version += 1;
        info!("event=tag_delete module=repo status=ok id={id}");
        Ok(())
    }

    /// Rewrites both collections to storage unchanged.
    ///
    /// Teardown safety net; every mutation already persists synchronously.
    pub fn flush(&mut self) -> RepoResult<()> {
        self.notes.flush(&mut self.store)?;
        self.tags.flush(&mut self.store)?;
        info!("event=repo_flush module=repo status=ok");
        Ok(())
    }

    /// Consumes the repository, returning the storage port.
    pub fn into_store(self) -> S {
        self.store
    }
}
