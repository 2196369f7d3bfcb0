use crate::modules::teachers::controller::{
    get_filtered_teachers, get_paginated_teachers, get_teacher, save_teacher,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(save_teacher).get(get_paginated_teachers))
        .route("/filter", post(get_filtered_teachers))
        .route("/{uuid}", get(get_teacher))
}
