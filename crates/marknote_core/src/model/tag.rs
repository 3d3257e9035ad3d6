//! Tag domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another tag.
//! - `label` is mutable display text; two tags with the same label but
//!   different ids may coexist (no dedup at this layer).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a tag.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TagId = Uuid;

/// A user-defined label attachable to any number of notes.
///
/// Notes reference tags by id only, so renaming a tag is visible across all
/// notes without rewriting any note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable global id used by notes as a cross-reference.
    pub id: TagId,
    /// Display text shown in tag pickers and note views.
    pub label: String,
}

impl Tag {
    /// Creates a tag with a generated stable id.
    ///
    /// Used for inline tag creation while editing a note.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), label)
    }

    /// Creates a tag with a caller-provided stable id.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this tag's lifetime.
    pub fn with_id(id: TagId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
