//! Authentication models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// JWT claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username of the authenticated principal.
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Credentials submitted to the authenticate endpoint.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct AuthenticationRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Name summary plus bearer token returned on successful authentication.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticationResponse {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_request_requires_fields() {
        let dto = AuthenticationRequest {
            username: "".to_string(),
            password: "pass".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = AuthenticationRequest {
            username: "gpapas".to_string(),
            password: "pass".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
