//! Teacher data models and DTOs.
//!
//! This module re-exports teacher models from the `eduapp-models` crate and
//! provides the controller-facing upload type.

// Re-export all teacher models from the shared crate
pub use eduapp_models::teachers::*;

/// An uploaded supporting document as assembled from the multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client.
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
