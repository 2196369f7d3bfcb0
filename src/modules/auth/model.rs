//! Authentication DTOs.
//!
//! Re-exported from the `eduapp-models` crate.

pub use eduapp_models::auth::*;
