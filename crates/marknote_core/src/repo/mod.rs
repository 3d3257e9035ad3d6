//! Repository layer: ownership of the raw collections.
//!
//! # Responsibility
//! - Own the notes and tags collections as the single source of truth.
//! - Funnel every mutation through the persistence port synchronously.
//!
//! # Invariants
//! - Mutations are atomic with respect to storage: either the stored
//!   collection is fully replaced or it stays at its prior state.
//! - Update/delete of a missing id is a silent no-op, never an error.

pub mod notebook_repo;
