use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::teachers::model::{
    PageParams, TeacherFilters, TeacherInsert, TeacherReadOnly, UploadedFile,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ResponseMessage};
use crate::validator::validation_error_map;
use eduapp_models::pagination::Paginated;

/// Multipart part carrying the teacher JSON.
const TEACHER_PART: &str = "teacher";
/// Multipart part carrying the optional AMKA supporting document.
const AMKA_FILE_PART: &str = "amkaFile";

/// Register a new teacher from a multipart request (JSON + optional AMKA file)
#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body(content = TeacherInsert, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Teacher created successfully", body = TeacherReadOnly),
        (status = 400, description = "Malformed request or validation failure", body = ResponseMessage),
        (status = 401, description = "Unauthorized", body = ResponseMessage),
        (status = 409, description = "VAT, AMKA, username or identity number already exists", body = ResponseMessage),
        (status = 500, description = "Internal server error", body = ResponseMessage)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, multipart))]
pub async fn save_teacher(
    State(state): State<AppState>,
    _auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TeacherReadOnly>), AppError> {
    let mut teacher_dto: Option<TeacherInsert> = None;
    let mut amka_file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_argument(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some(TEACHER_PART) => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::invalid_argument(format!("Unreadable teacher part: {}", e))
                })?;
                let dto = serde_json::from_slice::<TeacherInsert>(&bytes).map_err(|e| {
                    AppError::invalid_argument(format!("Invalid teacher payload: {}", e))
                })?;
                teacher_dto = Some(dto);
            }
            Some(AMKA_FILE_PART) => {
                let filename = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::invalid_argument(format!("Unreadable amka file part: {}", e))
                })?;
                if !bytes.is_empty() {
                    amka_file = Some(UploadedFile {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let dto = teacher_dto
        .ok_or_else(|| AppError::invalid_argument("Missing 'teacher' multipart part"))?;

    dto.validate()
        .map_err(|errors| AppError::Validation(validation_error_map(&errors)))?;

    let teacher = TeacherService::save_teacher(&state.db, &state.storage, dto, amka_file).await?;

    let location = format!("/api/teachers/{}", teacher.uuid);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(teacher),
    ))
}

/// Page through all teachers without filters
#[utoipa::path(
    get,
    path = "/api/teachers",
    params(
        PageParams
    ),
    responses(
        (status = 200, description = "One page of teachers", body = Paginated<TeacherReadOnly>),
        (status = 401, description = "Unauthorized", body = ResponseMessage),
        (status = 500, description = "Internal server error", body = ResponseMessage)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_paginated_teachers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<TeacherReadOnly>>, AppError> {
    let page = params.page.unwrap_or(0);
    let size = params.size.unwrap_or(5);

    let teachers = TeacherService::get_paginated_teachers(&state.db, page, size).await?;
    Ok(Json(teachers))
}

/// Page through teachers matching an optional filter body
#[utoipa::path(
    post,
    path = "/api/teachers/filter",
    request_body = TeacherFilters,
    responses(
        (status = 200, description = "One page of matching teachers", body = Paginated<TeacherReadOnly>),
        (status = 401, description = "Unauthorized", body = ResponseMessage),
        (status = 500, description = "Internal server error", body = ResponseMessage)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, body))]
pub async fn get_filtered_teachers(
    State(state): State<AppState>,
    _auth: AuthUser,
    body: axum::body::Bytes,
) -> Result<Json<Paginated<TeacherReadOnly>>, AppError> {
    // an absent or null body degrades to the all-identity filter
    let filters = if body.is_empty() {
        TeacherFilters::default()
    } else {
        serde_json::from_slice::<Option<TeacherFilters>>(&body)
            .map_err(|e| AppError::invalid_argument(format!("Invalid filter payload: {}", e)))?
            .unwrap_or_default()
    };

    let teachers = TeacherService::get_teachers_filtered_paginated(&state.db, filters).await?;
    Ok(Json(teachers))
}

/// Fetch one teacher by its stable uuid
#[utoipa::path(
    get,
    path = "/api/teachers/{uuid}",
    params(
        ("uuid" = String, Path, description = "Stable teacher identifier")
    ),
    responses(
        (status = 200, description = "Teacher details", body = TeacherReadOnly),
        (status = 401, description = "Unauthorized", body = ResponseMessage),
        (status = 404, description = "Teacher not found", body = ResponseMessage),
        (status = 500, description = "Internal server error", body = ResponseMessage)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(uuid): Path<String>,
) -> Result<Json<TeacherReadOnly>, AppError> {
    let teacher = TeacherService::get_teacher_by_uuid(&state.db, &uuid).await?;
    Ok(Json(teacher))
}
