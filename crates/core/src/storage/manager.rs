use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::snapshot::Snapshot;

use super::format;
use super::traits::PersistenceStore;

/// High-level storage operations: save/load a snapshot to/from a store key.
pub struct StorageManager;

impl StorageManager {
    /// Encode and write a snapshot, replacing whatever was under `key`.
    ///
    /// Flow: Snapshot → JSON → store.write(key)
    pub fn save(store: &dyn PersistenceStore, key: &str, snapshot: &Snapshot) -> Result<(), CoreError> {
        let bytes = format::encode(snapshot)?;
        store.write(key, &bytes)
    }

    /// Read and decode the snapshot under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet. Unreadable or
    /// corrupt data is an `Err`; callers decide whether to fall back.
    pub fn load(store: &dyn PersistenceStore, key: &str) -> Result<Option<Snapshot>, CoreError> {
        match store.read(key)? {
            Some(bytes) => format::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// [`save`](Self::save) with the store write moved to tokio's blocking pool.
    /// Encoding happens on the caller's task.
    pub async fn save_blocking(
        store: Arc<dyn PersistenceStore>,
        key: &str,
        snapshot: &Snapshot,
    ) -> Result<(), CoreError> {
        let bytes = format::encode(snapshot)?;
        let key = key.to_owned();
        tokio::task::spawn_blocking(move || store.write(&key, &bytes))
            .await
            .map_err(|e| CoreError::Storage(format!("Store write task failed: {e}")))?
    }

    /// [`load`](Self::load) with the store read moved to tokio's blocking pool.
    pub async fn load_blocking(
        store: Arc<dyn PersistenceStore>,
        key: &str,
    ) -> Result<Option<Snapshot>, CoreError> {
        let key = key.to_owned();
        let bytes = tokio::task::spawn_blocking(move || store.read(&key))
            .await
            .map_err(|e| CoreError::Storage(format!("Store read task failed: {e}")))??;
        bytes.map(|b| format::decode(&b)).transpose()
    }
}
