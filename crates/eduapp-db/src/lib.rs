//! # Eduapp DB
//!
//! Database pool initialization for the Eduapp API.
//!
//! # Example
//!
//! ```ignore
//! use eduapp_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     // Use pool for database operations
//! }
//! ```

use std::env;

/// Initializes a PostgreSQL connection pool.
///
/// Reads the connection string from the `DATABASE_URL` environment variable.
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection cannot be
/// established. This function is meant to be called once during startup.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
