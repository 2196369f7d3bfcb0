use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::utils::errors::ResponseMessage;
use eduapp_models::auth::{AuthenticationRequest, AuthenticationResponse};
use eduapp_models::pagination::Paginated;
use eduapp_models::teachers::{
    AttachmentMeta, PersonalInfoInsert, PersonalInfoReadOnly, TeacherFilters, TeacherInsert,
    TeacherReadOnly,
};
use eduapp_models::users::{UserInsert, UserReadOnly};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::authenticate,
        crate::modules::teachers::controller::save_teacher,
        crate::modules::teachers::controller::get_paginated_teachers,
        crate::modules::teachers::controller::get_filtered_teachers,
        crate::modules::teachers::controller::get_teacher,
    ),
    components(
        schemas(
            AuthenticationRequest,
            AuthenticationResponse,
            TeacherInsert,
            TeacherReadOnly,
            TeacherFilters,
            UserInsert,
            UserReadOnly,
            PersonalInfoInsert,
            PersonalInfoReadOnly,
            AttachmentMeta,
            Paginated<TeacherReadOnly>,
            ResponseMessage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User authentication endpoints"),
        (name = "Teachers", description = "Teacher registration and listing endpoints")
    ),
    info(
        title = "Eduapp API",
        version = "0.1.0",
        description = "A teacher-registration REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
