use axum::Json;
use axum::extract::State;
use tracing::instrument;

use super::model::{AuthenticationRequest, AuthenticationResponse};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ResponseMessage};
use crate::validator::ValidatedJson;

/// Authenticate with username and password, receiving a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/authenticate",
    request_body = AuthenticationRequest,
    responses(
        (status = 200, description = "Authentication successful", body = AuthenticationResponse),
        (status = 400, description = "Bad request - validation error", body = ResponseMessage),
        (status = 401, description = "Invalid credentials", body = ResponseMessage),
        (status = 500, description = "Internal server error", body = ResponseMessage)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AuthenticationRequest>,
) -> Result<Json<AuthenticationResponse>, AppError> {
    let response = AuthService::authenticate(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
