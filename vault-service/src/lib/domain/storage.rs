pub mod errors;
pub mod ports;
pub mod service;

pub use errors::StorageError;
pub use ports::FileStore;
pub use service::StorageService;
