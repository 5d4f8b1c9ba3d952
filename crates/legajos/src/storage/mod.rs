//! Key-value persistence for the application's collections.
//!
//! Every collection is stored as one JSON document under a fixed key. Loading a
//! key that was never written yields the collection's seed data; saving always
//! writes the full collection.

mod json_dir;
mod memory;

pub use json_dir::JsonDirectoryStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// The seven persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKey {
    Supervisors,
    Services,
    Visits,
    Employees,
    DocumentTypes,
    EmployeeDocuments,
    AuditLogs,
}

impl CollectionKey {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Supervisors,
            Self::Services,
            Self::Visits,
            Self::Employees,
            Self::DocumentTypes,
            Self::EmployeeDocuments,
            Self::AuditLogs,
        ]
    }

    /// Storage key, shared with the browser build of the application.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supervisors => "app-supervisors",
            Self::Services => "app-services",
            Self::Visits => "app-visits",
            Self::Employees => "app-employees",
            Self::DocumentTypes => "app-doc-types",
            Self::EmployeeDocuments => "app-emp-docs",
            Self::AuditLogs => "app-audits",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load/save capability backing every store.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: CollectionKey) -> Result<Option<String>, StorageError>;
    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access collection {key}: {source}")]
    Io {
        key: CollectionKey,
        #[source]
        source: std::io::Error,
    },
    #[error("collection {key} is not valid JSON: {source}")]
    Corrupt {
        key: CollectionKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize collection {key}: {source}")]
    Serialize {
        key: CollectionKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Parse a persisted collection, falling back to `seed` when the key was never written.
pub fn load_collection<T, S, F>(store: &S, key: CollectionKey, seed: F) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
    F: FnOnce() -> Vec<T>,
{
    match store.load(key)? {
        Some(payload) => {
            let items: Vec<T> = serde_json::from_str(&payload)
                .map_err(|source| StorageError::Corrupt { key, source })?;
            debug!(%key, count = items.len(), "collection loaded");
            Ok(items)
        }
        None => {
            let items = seed();
            info!(%key, count = items.len(), "collection seeded with defaults");
            Ok(items)
        }
    }
}

pub fn save_collection<T, S>(store: &S, key: CollectionKey, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let payload =
        serde_json::to_string(items).map_err(|source| StorageError::Serialize { key, source })?;
    store.save(key, &payload)?;
    debug!(%key, count = items.len(), "collection saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u64,
        label: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: 3,
                label: "newest".to_string(),
            },
            Item {
                id: 1,
                label: "oldest".to_string(),
            },
        ]
    }

    #[test]
    fn missing_collection_falls_back_to_seed() {
        let store = MemoryStore::default();
        let loaded: Vec<Item> =
            load_collection(&store, CollectionKey::AuditLogs, items).expect("seed load");
        assert_eq!(loaded, items());
    }

    #[test]
    fn saved_collection_round_trips_in_order() {
        let store = MemoryStore::default();
        save_collection(&store, CollectionKey::AuditLogs, &items()).expect("save");
        let loaded: Vec<Item> =
            load_collection(&store, CollectionKey::AuditLogs, Vec::new).expect("load");
        assert_eq!(loaded, items());
    }

    #[test]
    fn empty_saved_collection_does_not_reseed() {
        let store = MemoryStore::default();
        save_collection::<Item, _>(&store, CollectionKey::Employees, &[]).expect("save");
        let loaded: Vec<Item> =
            load_collection(&store, CollectionKey::Employees, items).expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_collection_is_reported() {
        let store = MemoryStore::default();
        store
            .save(CollectionKey::Employees, "{not json")
            .expect("raw save");
        match load_collection::<Item, _, _>(&store, CollectionKey::Employees, items) {
            Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, CollectionKey::Employees),
            other => panic!("expected corrupt collection, got {other:?}"),
        }
    }

    #[test]
    fn keys_match_browser_layout() {
        let names: Vec<&str> = CollectionKey::ordered()
            .into_iter()
            .map(CollectionKey::as_str)
            .collect();
        assert_eq!(
            names,
            vec![
                "app-supervisors",
                "app-services",
                "app-visits",
                "app-employees",
                "app-doc-types",
                "app-emp-docs",
                "app-audits",
            ]
        );
    }
}
