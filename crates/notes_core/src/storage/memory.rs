use super::{entry_size, KeyValueStorage, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed storage with an optional byte quota.
///
/// Useful for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes that would make the total key+value size exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Total bytes currently accounted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let previous = self
                .entries
                .get(key)
                .map_or(0, |old| entry_size(key, old));
            let requested = self.used_bytes() - previous + entry_size(key, value);
            if requested > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::KeyValueStorage;

    #[test]
    fn set_get_remove_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn quota_counts_replacement_not_accumulation() {
        let mut storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "12345").unwrap();
        storage.set_item("k", "abcde").unwrap();

        let err = storage.set_item("k", "abcdef").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("abcde"));
    }
}
