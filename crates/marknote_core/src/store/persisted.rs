//! Typed binding between an in-memory value and its stored JSON form.
//!
//! # Responsibility
//! - Load a value from the store by key, falling back to a default when the
//!   key is absent.
//! - Re-serialize and write the whole value on every mutation.
//!
//! # Invariants
//! - Loading an absent key yields the default and writes nothing; the first
//!   write happens on the first mutation.
//! - `set`/`update` follow write-then-commit order: the store is written
//!   before the in-memory value changes, so a failed write leaves both sides
//!   at their prior consistent state.
//! - Every write replaces the whole collection; there is no delta encoding.
//!   Fine at personal-collection scale, a ceiling beyond that.

use crate::store::{KeyValueStore, StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A value bound to a fixed storage key, persisted on every mutation.
#[derive(Debug)]
pub struct Persisted<T> {
    key: &'static str,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads the value stored under `key`, or binds `default` when absent.
    ///
    /// # Errors
    /// - `StoreError::Corrupt` when a value exists but fails to decode; the
    ///   stored bytes are left untouched for recovery.
    pub fn load<S: KeyValueStore>(store: &S, key: &'static str, default: T) -> StoreResult<Self> {
        let value = match store.get(key)? {
            Some(text) => serde_json::from_str(&text)
                .map_err(|source| StoreError::Corrupt { key, source })?,
            None => default,
        };
        Ok(Self { key, value })
    }

    /// Returns the storage key this value is bound to.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value, persisting it before committing in memory.
    pub fn set<S: KeyValueStore>(&mut self, store: &mut S, value: T) -> StoreResult<()> {
        let text = serde_json::to_string(&value).map_err(|source| StoreError::Encode {
            key: self.key,
            source,
        })?;
        store.set(self.key, &text)?;
        self.value = value;
        Ok(())
    }

    /// Replaces the value with a function of the previous value.
    pub fn update<S, F>(&mut self, store: &mut S, f: F) -> StoreResult<()>
    where
        S: KeyValueStore,
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(store, next)
    }

    /// Rewrites the current value to storage unchanged.
    ///
    /// Teardown safety net; every mutation already persists synchronously.
    pub fn flush<S: KeyValueStore>(&self, store: &mut S) -> StoreResult<()> {
        let text = serde_json::to_string(&self.value).map_err(|source| StoreError::Encode {
            key: self.key,
            source,
        })?;
        store.set(self.key, &text)
    }
}
