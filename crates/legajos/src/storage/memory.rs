use super::{CollectionKey, KeyValueStore, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Volatile store used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<CollectionKey, String>>>,
}

impl MemoryStore {
    pub fn raw(&self, key: CollectionKey) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|guard| guard.get(&key).cloned())
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: CollectionKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store mutex poisoned".to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store mutex poisoned".to_string()))?;
        guard.insert(key, payload.to_string());
        Ok(())
    }
}
