use std::env;
use std::path::PathBuf;

use eduapp_core::file_storage::LocalFileStorage;

/// Builds the attachment storage collaborator from the `UPLOAD_DIR`
/// environment variable, defaulting to `uploads/`.
pub fn init_file_storage() -> LocalFileStorage {
    let base_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    LocalFileStorage::new(PathBuf::from(base_dir))
}
