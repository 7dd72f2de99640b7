use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::storage::errors::StorageError;
use crate::domain::storage::ports::FileStore;
use crate::domain::user::models::UserId;

/// Platform metadata file that must never appear in a listing.
const HOUSEKEEPING_FILE: &str = ".DS_Store";

/// Resolves and maintains the per-user upload directories.
///
/// Every user id maps to exactly one directory under
/// `{root}/{uploads_dir}/{user_id}`. Directories are created lazily and
/// re-ensured on every access; nothing here ever deletes one.
pub struct StorageService<FS>
where
    FS: FileStore,
{
    file_store: Arc<FS>,
    base: PathBuf,
}

impl<FS> StorageService<FS>
where
    FS: FileStore,
{
    /// Create a new storage service.
    ///
    /// # Arguments
    /// * `file_store` - Filesystem adapter
    /// * `root` - Root of the storage volume
    /// * `uploads_dir` - Namespace under the root for per-user directories
    pub fn new(file_store: Arc<FS>, root: impl Into<PathBuf>, uploads_dir: &str) -> Self {
        Self {
            file_store,
            base: root.into().join(uploads_dir),
        }
    }

    /// Derive the upload directory for a user.
    ///
    /// Pure function: no I/O, and repeated calls yield an identical path.
    pub fn resolve(&self, user_id: &UserId) -> PathBuf {
        self.base.join(user_id.to_string())
    }

    /// Make sure a directory exists, creating it and any missing parents.
    ///
    /// Idempotent: calling it twice, or from two requests at once, leaves
    /// exactly one directory and never errors once the directory exists.
    ///
    /// # Errors
    /// * `Unavailable` - The existence probe or creation failed
    pub async fn ensure(&self, path: &Path) -> Result<(), StorageError> {
        if !self.file_store.path_exists(path).await? {
            self.file_store.make_dir_all(path).await?;
        }
        Ok(())
    }

    /// List the files in a directory, hiding housekeeping entries.
    ///
    /// # Errors
    /// * `Unavailable` - The directory could not be read
    pub async fn list_files(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        let mut names = self.file_store.list_dir(path).await?;
        names.retain(|name| name != HOUSEKEEPING_FILE);
        names.sort();
        Ok(names)
    }

    /// Store an uploaded file under a date-prefixed name.
    ///
    /// # Arguments
    /// * `dir` - Resolved upload directory (must already be ensured)
    /// * `original_name` - Filename reported by the client
    /// * `contents` - File contents
    ///
    /// # Returns
    /// The stored filename, `YYYY-MM-DD-<original>`
    ///
    /// # Errors
    /// * `Unavailable` - The write failed
    pub async fn store_file(
        &self,
        dir: &Path,
        original_name: &str,
        contents: &[u8],
    ) -> Result<String, StorageError> {
        let stored_name = format!("{}-{}", Utc::now().format("%Y-%m-%d"), original_name);
        self.file_store
            .write_file(&dir.join(&stored_name), contents)
            .await?;
        Ok(stored_name)
    }
}
