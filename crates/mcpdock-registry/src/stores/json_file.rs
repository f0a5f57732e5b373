//! File-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temp file
//! which is then renamed over the target, so readers see either the old or
//! the new document, never a partial one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use mcpdock_core::ports::{KeyValueStore, StoreError};

/// `KeyValueStore` over a directory of JSON documents.
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes writers so two temp files never race on the same rename.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::Io(format!("invalid store key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(format!("{}: {e}", path.display()))),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let body = serde_json::to_vec_pretty(&value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            StoreError::Unavailable(format!("{}: {e}", self.dir.display()))
        })?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, &body)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!("{}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.get("servers").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store"));

        store.set("servers", json!([{"id": "a"}])).await.unwrap();
        assert_eq!(
            store.get("servers").await.unwrap(),
            Some(json!([{"id": "a"}]))
        );
        assert!(dir.path().join("store").join("servers.json").exists());

        store.set("servers", json!([])).await.unwrap();
        assert_eq!(store.get("servers").await.unwrap(), Some(json!([])));

        store.remove("servers").await.unwrap();
        store.remove("servers").await.unwrap();
        assert!(store.get("servers").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("servers.json"), b"{not json").unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(
            store.get("servers").await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.set("../escape", json!(1)).await.is_err());
        assert!(store.get("").await.is_err());
    }
}
