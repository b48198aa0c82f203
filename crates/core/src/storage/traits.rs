use crate::errors::CoreError;

/// Durable key-value store the engine persists its snapshot into.
///
/// `write` replaces the whole value under `key`. Implementations must not leave
/// a partially written value behind if they fail.
pub trait PersistenceStore: Send + Sync {
    /// Raw bytes stored under `key`, or `None` when nothing has been saved yet.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Overwrite the value under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError>;
}
