use crate::modules::auth::controller::authenticate;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/authenticate", post(authenticate))
}
