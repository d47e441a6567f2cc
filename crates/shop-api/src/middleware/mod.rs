//! Axum middleware: role guard, CORS and request logging.

pub mod auth;
pub mod cors;
pub mod logging;
