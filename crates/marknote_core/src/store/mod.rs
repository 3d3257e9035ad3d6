//! Key-value persistence port and error taxonomy.
//!
//! # Responsibility
//! - Define the storage contract the rest of core writes through.
//! - Distinguish "no value yet" from "value present but undecodable".
//!
//! # Invariants
//! - All storage access is funneled through `KeyValueStore`; no other module
//!   touches the storage medium directly.
//! - A corrupt stored value is reported, never silently replaced with a
//!   default, and the corrupt bytes stay in storage for recovery.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod persisted;
mod sqlite;

pub use persisted::Persisted;
pub use sqlite::SqliteKeyValueStore;

/// Storage key for the raw notes collection.
pub const NOTES_KEY: &str = "NOTES";
/// Storage key for the tags collection.
pub const TAGS_KEY: &str = "TAGS";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy for the persistence port.
#[derive(Debug)]
pub enum StoreError {
    /// Transport failure in the underlying medium.
    Db(DbError),
    /// A value exists under `key` but cannot be decoded.
    ///
    /// Distinct from a missing key on purpose: a missing key yields the
    /// caller's default, while corruption must surface to the caller.
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
    /// The in-memory value could not be encoded for storage.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt { key, source } => {
                write!(f, "stored value under `{key}` is corrupt: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode value for `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupt { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence port: get/set of textually encoded values by string key.
///
/// Mirrors the shape of a browser-local key-value store; implementations own
/// the medium exclusively, so no cross-component synchronization is needed.
pub trait KeyValueStore {
    /// Returns the stored text under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value whole.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}
