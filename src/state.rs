use sqlx::PgPool;

use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::storage::init_file_storage;
use eduapp_core::file_storage::LocalFileStorage;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub storage: LocalFileStorage,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        storage: init_file_storage(),
    }
}
