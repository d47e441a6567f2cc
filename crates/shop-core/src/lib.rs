//! # shop-core
//!
//! Core crate for Shop Online. Contains configuration schemas, the
//! unified error system, and the crate-wide result alias.
//!
//! This crate has **no** internal dependencies on other Shop Online crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
