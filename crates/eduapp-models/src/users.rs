//! User models and DTOs.
//!
//! A user is the login identity owned by a teacher. It is never created on
//! its own through the API; the teacher insert pipeline creates it together
//! with the rest of the aggregate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Read-only projection of a user. The password hash never leaves the
/// database layer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct UserReadOnly {
    pub id: i64,
    pub username: String,
    pub vat: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: String,
    pub is_active: bool,
}

/// DTO for the user part of a teacher insert.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct UserInsert {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Tax identification number, nine digits.
    #[validate(length(min = 9, max = 9, message = "vat must be 9 characters"))]
    pub vat: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}
