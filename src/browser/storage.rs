//! `sessionStorage` / `localStorage` behind [`KeyValueStore`].

use web_sys::Storage;

use super::js_reason;
use crate::error::StorageError;
use crate::platform::KeyValueStore;
use crate::platform::memory::MemoryStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    /// Cleared when the tab closes.
    Session,
    /// Survives browser restarts.
    Local,
}

pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when there is no window or the
    /// browser denies access to the requested area.
    pub fn open(area: StorageArea) -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = match area {
            StorageArea::Session => window.session_storage(),
            StorageArea::Local => window.local_storage(),
        }
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write { key: key.to_owned(), reason: js_reason(&err) })
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.storage.remove_item(key) {
            log::debug!("remove {key} failed: {}", js_reason(&err));
        }
    }
}

/// Browser storage when the page may use it, page-lifetime memory otherwise.
pub enum PageStore {
    Browser(WebStorage),
    Memory(MemoryStore),
}

impl PageStore {
    pub fn open(area: StorageArea) -> Self {
        match WebStorage::open(area) {
            Ok(storage) => Self::Browser(storage),
            Err(err) => {
                log::warn!("{area:?} storage: {err}; keeping values in memory");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for PageStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Browser(storage) => storage.get(key),
            Self::Memory(storage) => storage.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Browser(storage) => storage.set(key, value),
            Self::Memory(storage) => storage.set(key, value),
        }
    }

    fn remove(&self, key: &str) {
        match self {
            Self::Browser(storage) => storage.remove(key),
            Self::Memory(storage) => storage.remove(key),
        }
    }
}
