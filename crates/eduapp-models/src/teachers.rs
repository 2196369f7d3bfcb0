//! Teacher aggregate models, insert DTOs, and filtering parameters.
//!
//! The teacher is the aggregate root: it owns exactly one user (login
//! identity) and one personal-info record (identity documents), and the three
//! are only ever created together by the insert pipeline. The filter object
//! mirrors the reference API: every field is optional and an absent field
//! simply contributes no predicate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::users::{UserInsert, UserReadOnly};

/// Metadata of an uploaded supporting document.
///
/// The binary content lives on the filesystem under `file_path`; only this
/// metadata is persisted relationally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AttachmentMeta {
    /// Original filename as sent by the client. Never used for storage.
    pub filename: Option<String>,
    /// Generated collision-resistant name the content is stored under.
    pub saved_name: String,
    pub file_path: String,
    pub content_type: Option<String>,
    /// Last `.`-separated suffix of the original filename, dot included, or
    /// empty.
    pub extension: String,
}

/// DTO for the personal-info part of a teacher insert.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct PersonalInfoInsert {
    /// Social-insurance number, eleven digits.
    #[validate(length(min = 11, max = 11, message = "amka must be 11 characters"))]
    pub amka: String,
    #[validate(length(min = 1, message = "identity_number is required"))]
    pub identity_number: String,
}

/// Read-only projection of a personal-info record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PersonalInfoReadOnly {
    pub id: i64,
    pub amka: String,
    pub identity_number: String,
    pub amka_file: Option<AttachmentMeta>,
}

/// Candidate teacher: the full aggregate as submitted by the client.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct TeacherInsert {
    #[validate(nested)]
    pub user: UserInsert,
    #[validate(nested)]
    pub personal_info: PersonalInfoInsert,
    /// Defaults to true when absent.
    pub is_active: Option<bool>,
}

/// Read-only projection of a persisted teacher.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TeacherReadOnly {
    pub id: i64,
    /// Externally stable identifier, assigned once at creation.
    pub uuid: String,
    pub is_active: bool,
    pub user: UserReadOnly,
    pub personal_info: PersonalInfoReadOnly,
}

/// Flat row produced by the joined teacher select; mapped into
/// [`TeacherReadOnly`] for the API.
#[derive(FromRow, Debug, Clone)]
pub struct TeacherRow {
    pub id: i64,
    pub uuid: String,
    pub is_active: bool,
    pub user_id: i64,
    pub username: String,
    pub vat: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: String,
    pub user_is_active: bool,
    pub personal_info_id: i64,
    pub amka: String,
    pub identity_number: String,
    pub att_filename: Option<String>,
    pub att_saved_name: Option<String>,
    pub att_file_path: Option<String>,
    pub att_content_type: Option<String>,
    pub att_extension: Option<String>,
}

impl From<TeacherRow> for TeacherReadOnly {
    fn from(row: TeacherRow) -> Self {
        let amka_file = row.att_saved_name.map(|saved_name| AttachmentMeta {
            filename: row.att_filename,
            saved_name,
            file_path: row.att_file_path.unwrap_or_default(),
            content_type: row.att_content_type,
            extension: row.att_extension.unwrap_or_default(),
        });

        TeacherReadOnly {
            id: row.id,
            uuid: row.uuid,
            is_active: row.is_active,
            user: UserReadOnly {
                id: row.user_id,
                username: row.username,
                vat: row.vat,
                firstname: row.firstname,
                lastname: row.lastname,
                role: row.role,
                is_active: row.user_is_active,
            },
            personal_info: PersonalInfoReadOnly {
                id: row.personal_info_id,
                amka: row.amka,
                identity_number: row.identity_number,
                amka_file,
            },
        }
    }
}

/// Filter object for the teacher listing. Every field is independently
/// optional; blank strings count as absent.
#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema)]
pub struct TeacherFilters {
    /// Case-insensitive substring match on the teacher uuid.
    #[serde(default)]
    pub uuid: Option<String>,
    /// Exact match on the linked user's VAT.
    #[serde(default)]
    pub user_vat: Option<String>,
    /// Exact match on the linked personal info's AMKA.
    #[serde(default)]
    pub user_amka: Option<String>,
    /// Exact match on the linked user's active flag.
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

impl TeacherFilters {
    /// Zero-based page number, defaulting to 0.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    /// Page size, defaulting to 5 and clamped between 1 and 100.
    pub fn size(&self) -> i64 {
        self.size.unwrap_or(5).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.page() * self.size()
    }
}

/// Query parameters of the filterless paginated listing.
#[derive(Deserialize, Debug, IntoParams)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}
