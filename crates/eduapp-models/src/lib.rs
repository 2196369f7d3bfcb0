//! # Eduapp Models
//!
//! Domain models and DTOs for the Eduapp API.
//!
//! This crate provides the data structures used throughout the application:
//! database rows, request/response DTOs, the teacher filter object, and the
//! pagination envelope.
//!
//! # Modules
//!
//! - [`auth`]: Authentication models (credentials, claims, token response)
//! - [`pagination`]: Paged-result envelope
//! - [`teachers`]: Teacher aggregate models, insert DTOs, and filters
//! - [`users`]: User models

pub mod auth;
pub mod pagination;
pub mod teachers;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthenticationRequest, AuthenticationResponse, Claims};

pub use pagination::Paginated;

pub use teachers::{
    AttachmentMeta, PageParams, PersonalInfoInsert, PersonalInfoReadOnly, TeacherFilters,
    TeacherInsert, TeacherReadOnly, TeacherRow,
};

pub use users::{UserInsert, UserReadOnly};
