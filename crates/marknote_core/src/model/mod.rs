//! Domain model for notes and tags.
//!
//! # Responsibility
//! - Define the persisted shapes (`RawNote`, `Tag`) and the derived read
//!   shape (`Note`).
//!
//! # Invariants
//! - Every note and tag is identified by a stable id, unique within its
//!   collection for the lifetime of the store.
//! - `RawNote` stores tag *references* (`tag_ids`), never tag values; the
//!   hydrated `Note` is derived data and is never persisted.

pub mod note;
pub mod tag;
