use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;
use eduapp_models::auth::Claims;

/// Extractor that validates the bearer token and provides the authenticated
/// principal's claims. The teacher endpoints only need to know that a
/// validated principal is available.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
