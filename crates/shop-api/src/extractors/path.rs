//! Typed path parameter helpers.

use uuid::Uuid;

use shop_core::error::AppError;

/// Parses a user id from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::bad_request("Invalid user id"))
}
