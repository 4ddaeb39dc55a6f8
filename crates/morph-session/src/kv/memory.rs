use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{KeyValueStore, StoreError};

/// In-memory backend. Clones share the same map, so a caller can keep a
/// handle to inspect what the session mirrored.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses values larger than `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(limit),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Other(anyhow::anyhow!("memory store lock poisoned")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    needed: value.len(),
                    limit,
                });
            }
        }
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
