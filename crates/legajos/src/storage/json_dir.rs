use super::{CollectionKey, KeyValueStore, StorageError};
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Stores each collection as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    root: PathBuf,
}

impl JsonDirectoryStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: CollectionKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl KeyValueStore for JsonDirectoryStore {
    fn load(&self, key: CollectionKey) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn save(&self, key: CollectionKey, payload: &str) -> Result<(), StorageError> {
        write_atomic(&self.root, &self.path_for(key), payload.as_bytes())
            .map_err(|source| StorageError::Io { key, source })
    }
}

fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let tmp = dir.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|s| s.to_str()).unwrap_or("collection"),
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonDirectoryStore::new(dir.path());
        assert!(store
            .load(CollectionKey::Visits)
            .expect("load succeeds")
            .is_none());
    }

    #[test]
    fn save_creates_directory_and_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonDirectoryStore::new(dir.path().join("nested"));
        store
            .save(CollectionKey::Employees, "[]")
            .expect("save succeeds");

        let path = store.path_for(CollectionKey::Employees);
        assert!(path.ends_with("app-employees.json"));
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "[]");
        assert_eq!(
            store.load(CollectionKey::Employees).expect("load"),
            Some("[]".to_string())
        );
    }

    #[test]
    fn save_replaces_previous_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonDirectoryStore::new(dir.path());
        store.save(CollectionKey::AuditLogs, "[1]").expect("first");
        store.save(CollectionKey::AuditLogs, "[2,1]").expect("second");
        assert_eq!(
            store.load(CollectionKey::AuditLogs).expect("load"),
            Some("[2,1]".to_string())
        );
        let leftovers = std::fs::read_dir(dir.path())
            .expect("list")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
            .count();
        assert_eq!(leftovers, 0);
    }
}
