//! Custom Axum extractors.

pub mod auth;
pub mod path;

pub use auth::{AuthUser, bearer_token};
pub use path::parse_uuid;
