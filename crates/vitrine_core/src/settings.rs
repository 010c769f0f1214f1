//! Persisted settings
//!
//! A thin wrapper around a string key-value medium (`localStorage` in the
//! browser). Values are stored as JSON scalars. Reads never fail: a missing,
//! unreadable or corrupt value yields the caller's fallback. Writes are
//! best-effort: a rejected write is logged and the caller's in-memory
//! mirror stays authoritative for the rest of the session.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

/// A string key-value persistence medium.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store a raw value under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    /// Raw stored text for `key`, bypassing deserialization.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed, failure-absorbing access to a [`KeyValueStore`].
#[derive(Debug)]
pub struct SettingsStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the value stored under `key`, or `fallback`.
    ///
    /// A stored JSON `null` counts as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(err) => {
                debug!(key, error = %err, "settings read failed, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                debug!(key, raw = %raw, error = %err, "corrupt setting, using fallback");
                fallback
            }
        }
    }

    /// Persist `value` under `key`. Failures are logged and dropped.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %err, "could not encode setting");
                return;
            }
        };

        match self.backend.set_item(key, &raw) {
            Ok(()) => debug!(key, value = %raw, "setting persisted"),
            Err(err) => warn!(key, error = %err, "setting not persisted"),
        }
    }
}
