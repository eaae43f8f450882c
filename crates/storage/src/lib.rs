//! Logo uploads to object storage.

pub mod config;
pub mod error;
pub mod store;
pub mod upload;

pub use config::StorageConfig;
pub use error::{StoreError, UploadError};
pub use store::{HttpObjectStore, ObjectStore};
pub use upload::{UploadFile, UploadService, sanitize_file_name};
