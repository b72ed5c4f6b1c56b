use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::codec::{deserialize, serialize};
use crate::storage::KeyValueStore;

/// JSON key/value access over one [`KeyValueStore`].
///
/// Once an instance is disabled it stops touching its store: writes become
/// no-ops and reads return the caller's default. Backend failures on an
/// enabled instance are logged and degrade the same way, so no operation
/// here returns an error.
pub struct StorageFacade<S: KeyValueStore> {
    storage: S,
    disabled: bool,
}

impl<S: KeyValueStore> StorageFacade<S> {
    pub fn new(storage: S) -> Self {
        log::debug!("Storage facade created without probe");
        Self {
            storage,
            disabled: false,
        }
    }

    /// Wraps `storage` after a write/read/remove round trip of `probe_key`.
    /// The instance comes out disabled if any step fails or the value read
    /// back differs from the one written.
    pub fn probed(storage: S, probe_key: &str) -> Self {
        let mut facade = Self::new(storage);
        facade.disabled = !facade.probe(probe_key);
        facade
    }

    fn probe(&mut self, probe_key: &str) -> bool {
        let written = match serialize(probe_key) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to encode storage probe: {}", e);
                return false;
            }
        };

        if let Err(e) = self.storage.set_item(probe_key, &written) {
            log::warn!("Storage probe write failed, disabling storage: {:?}", e);
            return false;
        }

        let read = match self.storage.get_item(probe_key) {
            Ok(raw) => deserialize(raw.as_deref()),
            Err(e) => {
                log::warn!("Storage probe read failed, disabling storage: {:?}", e);
                return false;
            }
        };

        if let Err(e) = self.storage.remove_item(probe_key) {
            log::warn!("Storage probe cleanup failed, disabling storage: {:?}", e);
            return false;
        }

        if read.as_ref().and_then(Value::as_str) != Some(probe_key) {
            log::warn!("Storage probe read back {:?}, disabling storage", read);
            return false;
        }

        log::debug!("Storage probe passed");
        true
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Stores `value` as JSON under `key` and hands it back.
    ///
    /// Returns `None` when the instance is disabled or the write failed. An
    /// `Option` value is written as is, so `None` is stored as `null`; use
    /// [`set_or_remove`](Self::set_or_remove) to remove on `None`.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Option<T> {
        if self.disabled {
            return None;
        }

        let text = match serialize(&value) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to serialize value for {:?}: {}", key, e);
                return None;
            }
        };

        match self.storage.set_item(key, &text) {
            Ok(()) => Some(value),
            Err(e) => {
                log::warn!("Failed to write {:?}: {:?}", key, e);
                None
            }
        }
    }

    /// Like [`set`](Self::set), but `None` removes the entry instead.
    pub fn set_or_remove<T: Serialize>(&mut self, key: &str, value: Option<T>) -> Option<T> {
        match value {
            Some(value) => self.set(key, value),
            None => {
                self.remove(key);
                None
            }
        }
    }

    pub fn get_value(&self, key: &str) -> Option<Value> {
        if self.disabled {
            return None;
        }

        match self.storage.get_item(key) {
            Ok(raw) => deserialize(raw.as_deref()),
            Err(e) => {
                log::warn!("Failed to read {:?}: {:?}", key, e);
                None
            }
        }
    }

    pub fn get_value_or(&self, key: &str, default: Value) -> Value {
        self.get_value(key).unwrap_or(default)
    }

    /// Reads `key` as a `T`. A stored value of a different shape counts as
    /// absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;

        match serde_json::from_value(value) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("Stored value for {:?} does not fit the requested type: {}", key, e);
                None
            }
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Whether `key` reads back as something. An entry holding empty text
    /// reads as absent and so reports `false` here.
    pub fn has(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    pub fn remove(&mut self, key: &str) {
        if self.disabled {
            return;
        }

        if let Err(e) = self.storage.remove_item(key) {
            log::warn!("Failed to remove {:?}: {:?}", key, e);
        }
    }

    pub fn clear(&mut self) {
        if self.disabled {
            return;
        }

        if let Err(e) = self.storage.clear() {
            log::warn!("Failed to clear storage: {:?}", e);
        }
    }

    /// Every entry in the store's enumeration order, or `None` when disabled.
    /// Entries that read as absent are left out.
    pub fn get_all(&self) -> Option<Map<String, Value>> {
        if self.disabled {
            return None;
        }

        let mut all = Map::new();
        self.for_each(|key, value| {
            if let Some(value) = value {
                all.insert(key.to_string(), value);
            }
        });

        Some(all)
    }

    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, Option<Value>),
    {
        if self.disabled {
            return;
        }

        for key in self.keys() {
            visitor(&key, self.get_value(&key));
        }
    }

    pub fn keys(&self) -> Vec<String> {
        if self.disabled {
            return Vec::new();
        }

        let length = match self.storage.length() {
            Ok(length) => length,
            Err(e) => {
                log::warn!("Failed to read storage length: {:?}", e);
                return Vec::new();
            }
        };

        let mut keys = Vec::with_capacity(length);
        for index in 0..length {
            match self.storage.key(index) {
                Ok(Some(key)) => keys.push(key),
                Ok(None) => break,
                Err(e) => {
                    log::warn!("Failed to read storage key {}: {:?}", index, e);
                    break;
                }
            }
        }

        keys
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}
