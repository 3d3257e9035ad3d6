//! Derived-view computation over the raw collections.
//!
//! # Responsibility
//! - Join raw notes to their tags (hydration).
//! - Filter the hydrated view by title query and required tag set.
//!
//! # Invariants
//! - Everything here is a pure function of its inputs; no stored state.
//! - Hydration drops dangling tag references without touching the raw data.

pub mod composer;
