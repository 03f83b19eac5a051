//! Persistent store adapter.
//!
//! The page persists four independent string blobs (the cart and three
//! catalog overrides). [`KeyValueStore`] is the seam: [`MemoryStore`] backs
//! tests and sessions where browser storage is unavailable, and
//! `LocalStorage` (wasm32 only) backs the real page.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors raised by a [`KeyValueStore`] or by the JSON helpers on top of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No storage backend is reachable (private mode, no window, disabled).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend rejected the operation (quota, security error).
    #[error("storage error: {0}")]
    Io(String),
    /// A value is present but does not deserialize into the expected shape.
    #[error("stored value under {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    /// A value could not be serialized.
    #[error("could not serialize value for {key}: {reason}")]
    Serialize { key: String, reason: String },
}

/// A string-keyed, string-valued persistent store.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Read and deserialize the JSON value under `key`.
///
/// Blank values count as absent.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] when the value does not parse as `T`, or the
/// backend's own error when it cannot be read.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            key: key.to_owned(),
            reason: e.to_string(),
        })
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if `value` cannot be serialized, or the
/// backend's own error when the write is rejected.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
        key: key.to_owned(),
        reason: e.to_string(),
    })?;
    store.set(key, &raw)
}

/// In-memory store. Ordered so snapshots compare deterministically.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::{KeyValueStore, StoreError};

    /// Browser `window.localStorage`.
    ///
    /// The handle is resolved once; a page without storage access gets
    /// [`StoreError::Unavailable`] from [`LocalStorage::open`].
    #[derive(Debug, Clone)]
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        /// Resolve `window.localStorage`.
        ///
        /// # Errors
        ///
        /// Returns an error if there is no window or storage is disabled.
        pub fn open() -> Result<Self, StoreError> {
            let window = web_sys::window().ok_or(StoreError::Unavailable)?;
            let storage = window
                .local_storage()
                .map_err(|e| StoreError::Io(format!("localStorage error: {e:?}")))?
                .ok_or(StoreError::Unavailable)?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.storage
                .get_item(key)
                .map_err(|e| StoreError::Io(format!("get_item({key}) failed: {e:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.storage
                .set_item(key, value)
                .map_err(|e| StoreError::Io(format!("set_item({key}) failed: {e:?}")))
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.storage
                .remove_item(key)
                .map_err(|e| StoreError::Io(format!("remove_item({key}) failed: {e:?}")))
        }
    }
}
