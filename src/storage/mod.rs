//! Persistence is a flat key-value store of JSON documents.
//!  - Keys are namespaced by user id and, for daily records, by ISO date. See [keys::StorageKey].
//!  - Values are plain JSON objects or arrays without schema versioning. See [entities].
//!  - Writes replace the whole value. Nothing is transactional.

pub mod entities;
pub mod keys;
pub mod kv_store;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::StorageError;

use keys::StorageKey;
use kv_store::KeyValueStore;

/// Reads and decodes the value under `key`. Absent keys are `None`, values that don't decode are
/// reported instead of being silently replaced.
pub async fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &StorageKey,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Same as [load_json] but falls back to `T::default()` for absent keys.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(
    store: &impl KeyValueStore,
    key: &StorageKey,
) -> Result<T, StorageError> {
    Ok(load_json(store, key).await?.unwrap_or_default())
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &StorageKey,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    debug!("Saving {} bytes under {key}", raw.len());
    store.set(key, raw).await
}
