use thiserror::Error;

/// Error for storage directory operations.
///
/// Every variant is fatal for the current request; nothing here is retried.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
