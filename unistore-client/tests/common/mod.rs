use std::collections::BTreeMap;

use unistore_client::{KeyValueStore, StorageError};

/// Accepts every write but reads back something else, like a store that
/// silently drops what it is given.
#[derive(Default)]
pub struct ForgetfulStorage {
    data: BTreeMap<String, String>,
}

impl KeyValueStore for ForgetfulStorage {
    type Error = StorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.get(key).map(|_| "\"forgotten\"".to_string()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.data.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.data.clear();
        Ok(())
    }

    fn length(&self) -> Result<usize, StorageError> {
        Ok(self.data.len())
    }

    fn key(&self, index: usize) -> Result<Option<String>, StorageError> {
        Ok(self.data.keys().nth(index).cloned())
    }
}

/// A store that already holds `entries` as raw text.
pub fn seeded<S: KeyValueStore>(mut storage: S, entries: &[(&str, &str)]) -> S {
    for (key, value) in entries {
        storage.set_item(key, value).unwrap();
    }
    storage
}

/// Enumerates newest entry first, unlike the key-sorted `MemoryStorage`.
#[derive(Default)]
pub struct NewestFirstStorage {
    entries: Vec<(String, String)>,
}

impl KeyValueStore for NewestFirstStorage {
    type Error = StorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.insert(0, (key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.retain(|(k, _)| k != key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }

    fn length(&self) -> Result<usize, StorageError> {
        Ok(self.entries.len())
    }

    fn key(&self, index: usize) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(index).map(|(k, _)| k.clone()))
    }
}
