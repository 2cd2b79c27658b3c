use std::{
    collections::HashMap,
    future::Future,
    ops::Deref,
    path::PathBuf,
    sync::Mutex,
};

use tracing::debug;

use crate::{
    error::StorageError,
    fs::operations::{read_locked, write_locked},
};

use super::keys::StorageKey;

/// Interface for abstracting where values are kept. Values are opaque strings, typed access goes
/// through [load_json](super::load_json) and [save_json](super::save_json).
pub trait KeyValueStore {
    fn get(
        &self,
        key: &StorageKey,
    ) -> impl Future<Output = Result<Option<String>, StorageError>>;

    fn set(
        &self,
        key: &StorageKey,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>>;

    fn remove(&self, key: &StorageKey) -> impl Future<Output = Result<(), StorageError>>;
}

impl<T: Deref> KeyValueStore for T
where
    T::Target: KeyValueStore,
{
    fn get(
        &self,
        key: &StorageKey,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> {
        self.deref().get(key)
    }

    fn set(
        &self,
        key: &StorageKey,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> {
        self.deref().set(key, value)
    }

    fn remove(&self, key: &StorageKey) -> impl Future<Output = Result<(), StorageError>> {
        self.deref().remove(key)
    }
}

/// The main realization of [KeyValueStore]. Every key is a `<key>.json` file in one directory.
pub struct FileStore {
    store_dir: PathBuf,
}

impl FileStore {
    pub fn new(store_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&store_dir)?;

        Ok(Self { store_dir })
    }

    fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.store_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        debug!("Reading {path:?}");
        Ok(read_locked(&path).await?)
    }

    async fn set(&self, key: &StorageKey, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key);
        debug!("Writing {path:?}");
        Ok(write_locked(&path, value.as_bytes()).await?)
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps everything in memory. Handy for tests and for embedding without touching the disk.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<StorageKey, String>> {
        // A poisoned map still holds consistent strings, every operation is a single call.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    async fn set(&self, key: &StorageKey, value: String) -> Result<(), StorageError> {
        self.values().insert(key.clone(), value);
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{FileStore, KeyValueStore, MemoryStore};
    use crate::storage::keys::StorageKey;

    #[tokio::test]
    async fn file_store_round_trip_and_remove() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().join("store"))?;
        let key = StorageKey::tasks("u1")?;

        assert_eq!(store.get(&key).await?, None);
        store.set(&key, "[]".into()).await?;
        assert_eq!(store.get(&key).await?.as_deref(), Some("[]"));
        assert!(dir.path().join("store").join("tasks_u1.json").exists());

        store.remove(&key).await?;
        store.remove(&key).await?;
        assert_eq!(store.get(&key).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn stores_behind_pointers_delegate() -> Result<()> {
        let store = Arc::new(MemoryStore::default());
        let key = StorageKey::language();
        store.set(&key, "\"ar\"".into()).await?;
        assert_eq!(store.as_ref().get(&key).await?.as_deref(), Some("\"ar\""));
        Ok(())
    }
}
