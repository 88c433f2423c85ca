//! Filesystem key-value backend.
//!
//! Each key is stored as `{base_path}/{key}.json`. Writes go to a temporary
//! file that is renamed over the target, so a crash never leaves a
//! half-written value behind.

use crate::KeyValueStore;
use async_trait::async_trait;
use std::path::PathBuf;
use storypal_error::{StorageError, StorageErrorKind, StorypalResult};

/// Filesystem storage backend.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store rooted at `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StorypalResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem store");
        Ok(Self { base_path })
    }

    /// Root directory.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> StorypalResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(key.to_string())).into());
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileSystemStore {
    #[tracing::instrument(skip(self))]
    async fn read(&self, key: &str) -> StorypalResult<Option<String>> {
        let path = self.path_for(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(value) => {
                tracing::debug!(path = %path.display(), size = value.len(), "Read value");
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, value), fields(size = value.len()))]
    async fn write(&self, key: &str, value: &str) -> StorypalResult<()> {
        let path = self.path_for(key)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, value).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Wrote value");
        Ok(())
    }
}
