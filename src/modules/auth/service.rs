use sqlx::PgPool;
use tracing::{info, instrument};

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{AuthenticationRequest, AuthenticationResponse};

pub struct AuthService;

impl AuthService {
    /// Checks the submitted credentials against the stored hash and issues a
    /// bearer token. Unknown usernames, wrong passwords, and deactivated
    /// accounts all fail the same way.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn authenticate(
        db: &PgPool,
        dto: AuthenticationRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthenticationResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            username: String,
            password: String,
            firstname: Option<String>,
            lastname: Option<String>,
            role: String,
            is_active: bool,
        }

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT username, password, firstname, lastname, role, is_active \
             FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password".to_string()))?;

        let is_valid = verify_password(&dto.password, &user.password)?;

        if !is_valid || !user.is_active {
            return Err(AppError::unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = create_access_token(&user.username, &user.role, jwt_config)?;

        info!(username = %user.username, "User authenticated");

        Ok(AuthenticationResponse {
            firstname: user.firstname,
            lastname: user.lastname,
            token,
        })
    }
}
