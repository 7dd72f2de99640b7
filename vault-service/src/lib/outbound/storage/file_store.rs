use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::storage::errors::StorageError;
use crate::domain::storage::ports::FileStore;

/// Filesystem adapter over tokio::fs.
pub struct TokioFileStore;

impl TokioFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStore for TokioFileStore {
    async fn path_exists(&self, path: &Path) -> Result<bool, StorageError> {
        match tokio::fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            // Anything else (permissions, I/O) means the volume is unusable
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    async fn make_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}
