//! # Eduapp Core
//!
//! Shared collaborators for the Eduapp API.
//!
//! This crate holds the pieces that the business services depend on but that
//! are not themselves business logic, currently the file storage abstraction
//! used for AMKA supporting documents.

pub mod file_storage;

pub use file_storage::{FileStorage, LocalFileStorage, StorageError, file_extension, saved_name};
