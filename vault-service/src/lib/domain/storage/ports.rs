use std::path::Path;

use async_trait::async_trait;

use crate::domain::storage::errors::StorageError;

/// Filesystem operations needed by the storage service.
///
/// Kept deliberately narrow: an existence probe, recursive directory
/// creation, a flat listing, and a single-file write.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Probe whether a path exists.
    ///
    /// # Errors
    /// * `Unavailable` - The probe failed for a reason other than "not found"
    ///   (e.g. permission denied)
    async fn path_exists(&self, path: &Path) -> Result<bool, StorageError>;

    /// Create a directory and all missing parents.
    ///
    /// Must succeed when the directory already exists, so that concurrent
    /// callers racing to create the same path never observe an error.
    ///
    /// # Errors
    /// * `Unavailable` - Creation failed
    async fn make_dir_all(&self, path: &Path) -> Result<(), StorageError>;

    /// List the entry names of a directory.
    ///
    /// # Errors
    /// * `Unavailable` - The directory could not be read
    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, StorageError>;

    /// Write a file, replacing any existing contents.
    ///
    /// # Errors
    /// * `Unavailable` - The write failed
    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError>;
}
