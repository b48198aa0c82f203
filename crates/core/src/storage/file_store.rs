use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::traits::PersistenceStore;
use crate::errors::CoreError;
use crate::models::settings::Settings;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// failed save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.data_dir.clone())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the value for `key` lives at.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            || key.starts_with('.')
        {
            return Err(CoreError::Storage(format!("Invalid store key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistenceStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}
