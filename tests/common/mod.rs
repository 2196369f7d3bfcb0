#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::path::PathBuf;
use uuid::Uuid;

use eduapp::config::jwt::JwtConfig;
use eduapp::router::init_router;
use eduapp::state::AppState;
use eduapp::utils::jwt::create_access_token;
use eduapp_core::file_storage::LocalFileStorage;

pub const BOUNDARY: &str = "eduapp-test-boundary";

/// Fresh per-test directory for stored attachments.
pub fn test_storage_dir() -> PathBuf {
    std::env::temp_dir().join(format!("eduapp-test-{}", Uuid::new_v4()))
}

pub fn setup_test_app_with_storage(pool: PgPool, storage_dir: PathBuf) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        storage: LocalFileStorage::new(storage_dir),
    };
    init_router(state)
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_storage(pool, test_storage_dir())
}

/// Token accepted by the app's auth extractor; the teacher endpoints only
/// require a validated principal.
pub fn bearer_token() -> String {
    dotenvy::dotenv().ok();
    create_access_token("testadmin", "ADMIN", &JwtConfig::from_env()).unwrap()
}

pub fn unique_vat() -> String {
    format!("{:09}", Uuid::new_v4().as_u128() % 1_000_000_000)
}

pub fn unique_amka() -> String {
    format!("{:011}", Uuid::new_v4().as_u128() % 100_000_000_000)
}

pub fn unique_username() -> String {
    format!("teacher-{}", Uuid::new_v4().simple())
}

pub fn unique_identity() -> String {
    format!("ID{}", Uuid::new_v4().simple())
}

pub fn teacher_payload(vat: &str, amka: &str, username: &str, identity: &str) -> Value {
    json!({
        "user": {
            "username": username,
            "password": "changeme12",
            "vat": vat,
            "firstname": "Test",
            "lastname": "Teacher"
        },
        "personal_info": {
            "amka": amka,
            "identity_number": identity
        }
    })
}

pub fn unique_teacher_payload() -> Value {
    teacher_payload(
        &unique_vat(),
        &unique_amka(),
        &unique_username(),
        &unique_identity(),
    )
}

/// Builds the multipart body the save-teacher endpoint expects: a `teacher`
/// JSON part plus an optional `amkaFile` part.
pub fn multipart_body(teacher: &Value, file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"teacher\"\r\n\
             Content-Type: application/json\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(teacher.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"amkaFile\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn save_teacher_request(teacher: &Value, file: Option<(&str, &str, &[u8])>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/teachers")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token()))
        .body(Body::from(multipart_body(teacher, file)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token()))
        .body(Body::empty())
        .unwrap()
}

pub fn filter_request(filters: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/teachers/filter")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token()))
        .body(Body::from(filters.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(pool)
        .await
        .unwrap()
}
