//! Pure view derivation: hydrate, filter, lookup.
//!
//! # Invariants
//! - Output order of notes always follows the input notes' order.
//! - A hydrated note's tags follow the tags *collection's* order, not the
//!   note's `tag_ids` order. Chosen tie-break, documented, not necessarily
//!   intuitive.

use crate::model::note::{Note, NoteId, RawNote};
use crate::model::tag::Tag;

/// Resolves each raw note's tag ids against the current tag collection.
///
/// Dangling ids (tags deleted since the note was written) are silently
/// dropped from the result; the raw note is not modified.
pub fn hydrate(notes: &[RawNote], tags: &[Tag]) -> Vec<Note> {
    notes
        .iter()
        .map(|note| Note {
            id: note.id,
            title: note.title.clone(),
            body: note.body.clone(),
            tags: tags
                .iter()
                .filter(|tag| note.tag_ids.contains(&tag.id))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Returns the notes matching both predicates, preserving input order.
///
/// A note passes when its title contains `title_query` case-insensitively
/// (an empty query matches everything) AND every tag in `required_tags` is
/// present by id among the note's resolved tags (an empty set matches
/// everything). Substring containment, never exact or fuzzy.
pub fn filter(notes: &[Note], title_query: &str, required_tags: &[Tag]) -> Vec<Note> {
    let query = title_query.to_lowercase();
    notes
        .iter()
        .filter(|note| query.is_empty() || note.title.to_lowercase().contains(&query))
        .filter(|note| {
            required_tags.iter().all(|required| {
                note.tags.iter().any(|tag| tag.id == required.id)
            })
        })
        .cloned()
        .collect()
}

/// Looks up one hydrated note by id.
///
/// `None` is the routing signal to redirect to the default listing view; it
/// is not an error.
pub fn find_note_by_id<'a>(notes: &'a [Note], id: NoteId) -> Option<&'a Note> {
    notes.iter().find(|note| note.id == id)
}
