use std::collections::BTreeMap;

use super::KeyValueStore;
use crate::error::{Result, StorageError};

/// In-process stand-in for `localStorage` / `sessionStorage`.
///
/// Entries enumerate in key order. A quota can be set to reproduce hosts that
/// reject writes (private browsing reports a quota of zero), and a blocked
/// store fails every call the way a storage disabled by policy does.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: BTreeMap<String, String>,
    quota: Option<usize>,
    blocked: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }

    /// Bytes held by keys and values together.
    pub fn used_bytes(&self) -> usize {
        self.data.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_access(&self) -> Result<()> {
        if self.blocked {
            return Err(StorageError::unavailable("access to storage is denied"));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStorage {
    type Error = StorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_access()?;
        Ok(self.data.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_access()?;

        if let Some(limit) = self.quota {
            let replaced = self.data.get(key).map_or(0, |old| key.len() + old.len());
            if self.used_bytes() - replaced + key.len() + value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.check_access()?;
        self.data.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_access()?;
        self.data.clear();
        Ok(())
    }

    fn length(&self) -> Result<usize> {
        self.check_access()?;
        Ok(self.data.len())
    }

    fn key(&self, index: usize) -> Result<Option<String>> {
        self.check_access()?;
        Ok(self.data.keys().nth(index).cloned())
    }
}
