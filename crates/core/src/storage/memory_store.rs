use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::PersistenceStore;
use crate::errors::CoreError;

/// In-process store. Nothing survives the process; useful for embedding
/// hosts that persist elsewhere, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a value, e.g. to simulate an earlier session.
    pub fn insert(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.into(), bytes.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }
}

impl PersistenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        self.insert(key, bytes);
        Ok(())
    }
}
