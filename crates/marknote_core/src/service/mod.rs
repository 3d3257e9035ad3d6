//! Service layer: the façade the presentation layer talks to.
//!
//! # Responsibility
//! - Combine repository mutations with derived-view reads.
//! - Memoize hydration keyed on the repository's version counters.

pub mod notebook_service;
