pub mod auth;
pub mod teachers;
