//! File storage abstraction for uploaded supporting documents.
//!
//! Teacher registrations may carry an AMKA supporting document. The binary
//! content is stored outside the relational database; only metadata (original
//! name, generated name, path, content type, extension) is persisted. This
//! module provides the storage trait plus a local-filesystem implementation,
//! and the naming helpers that derive a collision-resistant stored name from
//! an untrusted original filename.

use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Abstract trait for attachment storage backends.
///
/// Implementations can be swapped without changing the insert pipeline.
pub trait FileStorage: Send + Sync {
    /// Save file content under the given stored name and return the full path
    /// the content was written to.
    fn save<'a>(
        &'a self,
        saved_name: &'a str,
        content: &'a [u8],
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, StorageError>> + Send + 'a>>;

    /// Delete a stored file by its saved name.
    ///
    /// Returns `Ok(())` if the file does not exist.
    fn delete<'a>(
        &'a self,
        saved_name: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<(), StorageError>> + Send + 'a>>;
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// Invalid stored-name format.
    InvalidName(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidName(msg) => write!(f, "Invalid stored name: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Extension of `filename` as its last `.`-separated suffix, dot included,
/// or an empty string when the name has no dot.
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx..].to_string(),
        None => String::new(),
    }
}

/// Collision-resistant stored name for an uploaded file.
///
/// The original name is never trusted for storage; only its extension
/// survives, appended to a fresh UUID.
pub fn saved_name(original_filename: &str) -> String {
    format!("{}{}", Uuid::new_v4(), file_extension(original_filename))
}

/// Local filesystem-based attachment storage.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    /// Base directory where files are stored
    base_dir: PathBuf,

    /// Maximum file size in bytes
    max_file_size: usize,
}

impl LocalFileStorage {
    const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_size(base_dir: PathBuf, max_file_size: usize) -> Self {
        Self {
            base_dir,
            max_file_size,
        }
    }

    /// Validate a stored name to prevent path traversal.
    ///
    /// Stored names are generated from a UUID plus an extension taken from an
    /// untrusted original filename, so the extension part still has to be
    /// checked here.
    fn validate_name(name: &str) -> Result<(), StorageError> {
        if name.is_empty() || name.contains("..") || name.starts_with('/') {
            return Err(StorageError::InvalidName(
                "Name must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(StorageError::InvalidName(
                "Name contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        saved_name: &'a str,
        content: &'a [u8],
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, StorageError>> + Send + 'a>>
    {
        Box::pin(async move {
            Self::validate_name(saved_name)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(saved_name);

            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(&file_path, content).await?;

            Ok(file_path.to_string_lossy().into_owned())
        })
    }

    fn delete<'a>(
        &'a self,
        saved_name: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<(), StorageError>> + Send + 'a>>
    {
        Box::pin(async move {
            Self::validate_name(saved_name)?;

            let file_path = self.base_dir.join(saved_name);

            match fs::remove_file(&file_path).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}
