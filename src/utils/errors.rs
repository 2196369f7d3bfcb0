//! Application error taxonomy and its HTTP boundary mapping.
//!
//! Every error kind maps 1:1 to a response status and a `{code, description}`
//! body; validation failures instead return the per-field error map directly.
//! Nothing is recovered locally; services propagate these unchanged.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use eduapp_core::file_storage::StorageError;

/// The four uniqueness keys a teacher insert is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Vat,
    Amka,
    Username,
    Identity,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vat => "VAT",
            Self::Amka => "AMKA",
            Self::Username => "Username",
            Self::Identity => "Identity",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    /// A uniqueness key already belongs to an existing record. Raised by the
    /// pre-checks, or late by the database constraint when inserts race.
    AlreadyExists {
        field: UniqueField,
        message: String,
    },
    /// Malformed or missing candidate fields, detected before any storage
    /// call.
    InvalidArgument(String),
    /// Structural validation failures on the request shape, per field.
    Validation(BTreeMap<String, String>),
    NotFound {
        resource: &'static str,
        message: String,
    },
    Unauthorized(String),
    /// Attachment write failed for reasons unrelated to uniqueness.
    Storage(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn already_exists(field: UniqueField, message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(resource: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::InvalidArgument(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code sent in the response body.
    pub fn code(&self) -> String {
        match self {
            Self::AlreadyExists { field, .. } => format!("{}AlreadyExists", field.as_str()),
            Self::InvalidArgument(_) => "InvalidArgument".to_string(),
            Self::Validation(_) => "ValidationFailed".to_string(),
            Self::NotFound { resource, .. } => format!("{}NotFound", resource),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            Self::Storage(_) => "FileUploadFailed".to_string(),
            Self::Internal(_) => "InternalServerError".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { message, .. } => write!(f, "{}", message),
            Self::InvalidArgument(message) => write!(f, "{}", message),
            Self::Validation(errors) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                write!(f, "Validation failed for: {}", fields.join(", "))
            }
            Self::NotFound { message, .. } => write!(f, "{}", message),
            Self::Unauthorized(message) => write!(f, "{}", message),
            Self::Storage(message) => write!(f, "{}", message),
            Self::Internal(err) => write!(f, "{}", err),
        }
    }
}

/// Response body for every non-validation error kind.
#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct ResponseMessage {
    pub code: String,
    pub description: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(errors) => {
                warn!(fields = ?errors.keys().collect::<Vec<_>>(), "Validation failed");
                return (StatusCode::BAD_REQUEST, Json(errors.clone())).into_response();
            }
            AppError::Internal(err) => {
                error!(error = %err, "Internal error");
            }
            other => {
                warn!(code = %other.code(), message = %other, "Request failed");
            }
        }

        let body = ResponseMessage {
            code: self.code(),
            description: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(anyhow::Error::from(err))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
