//! In-memory storage

use rustc_hash::FxHashMap;

use super::{CartStorage, StorageError};

/// Storage held in a hash map, optionally limited to a byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that refuses writes once values exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Create a store on which every operation fails with [`StorageError::Unavailable`].
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Total bytes held across all values.
    pub fn used_bytes(&self) -> usize {
        self.entries.values().map(String::len).sum()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }

        Ok(())
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;

        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        if let Some(quota) = self.quota {
            let replaced = self.entries.get(key).map_or(0, String::len);
            let needed = self.used_bytes() - replaced + value.len();

            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;

        self.entries.remove(key);

        Ok(())
    }
}
