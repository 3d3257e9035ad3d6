//! Note domain model: persisted and hydrated shapes.
//!
//! # Responsibility
//! - Define `RawNote` (storage-facing, tag ids only) and `Note` (read-only,
//!   tags resolved to values).
//! - Define `NoteDraft`, the write-side input for create/update.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `tag_ids` may hold dangling references; they are tolerated here and
//!   filtered out during hydration, never at write time.
//! - `Note` is pure derived data; only `RawNote` is ever persisted.

use crate::model::tag::{Tag, TagId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Storage-facing note record.
///
/// Stores tag references rather than tag values so tag renames stay
/// consistent across all notes without rewriting note records. Field names
/// match the stored JSON shape (`tagIds`), keeping existing data readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNote {
    /// Stable global id used for routing and cross-references.
    pub id: NoteId,
    /// Display title; empty strings are accepted at this layer.
    pub title: String,
    /// Markdown source text, stored opaquely.
    pub body: String,
    /// Ordered tag references; entries may dangle after a tag is deleted.
    #[serde(rename = "tagIds")]
    pub tag_ids: Vec<TagId>,
}

/// Read-only note view with tag ids resolved to live tag values.
///
/// Recomputed from the raw collections whenever either changes; never
/// persisted and never independently mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Same identity as the underlying `RawNote`.
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Tags currently resolvable from the tag collection, in that
    /// collection's order.
    pub tags: Vec<Tag>,
}

/// Write-side input for note create/update.
///
/// Carries full tag values as supplied by a tag picker; the repository
/// projects them down to ids before persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<Tag>,
}

impl NoteDraft {
    /// Projects the draft's tags down to their ids, the persisted form.
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

impl RawNote {
    /// Creates a raw note with a generated stable id from draft data.
    pub fn from_draft(draft: &NoteDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            tag_ids: draft.tag_ids(),
        }
    }
}

impl Note {
    /// Projects the hydrated view back to its persisted shape.
    ///
    /// Only resolvable tags survive the round trip; dangling references are
    /// already gone from `tags` by construction.
    pub fn to_raw(&self) -> RawNote {
        RawNote {
            id: self.id,
            title: self.title.clone(),
            body: self.body.clone(),
            tag_ids: self.tags.iter().map(|tag| tag.id).collect(),
        }
    }
}
