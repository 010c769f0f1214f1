//! `localStorage`-backed [`KeyValueStore`]

use vitrine_core::{KeyValueStore, Result, VitrineError};
use web_sys::Storage;

use crate::js_error;

/// Browser `localStorage`, or nothing when the browser denies access
///
/// Private browsing modes and sandboxed frames can refuse storage outright;
/// every call then reports [`VitrineError::StorageUnavailable`] and the
/// settings layer falls back to defaults.
#[derive(Clone, Debug, Default)]
pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    pub fn from_window() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, settings will not persist");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| VitrineError::StorageUnavailable("localStorage".to_string()))
    }
}

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| VitrineError::StorageUnavailable(js_error(err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| VitrineError::StorageWrite {
                key: key.to_string(),
                reason: js_error(err),
            })
    }
}
