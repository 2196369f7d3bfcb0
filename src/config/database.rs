//! Database configuration.
//!
//! Connection pool setup lives in the `eduapp-db` crate; this module only
//! re-exports it so all configuration concerns are reachable from
//! `crate::config`.

pub use eduapp_db::init_db_pool;
