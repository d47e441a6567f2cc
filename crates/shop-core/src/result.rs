//! Convenience result type alias for Shop Online.

use crate::error::AppError;

/// A specialized `Result` type for Shop Online operations.
pub type AppResult<T> = Result<T, AppError>;
