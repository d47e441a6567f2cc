//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default.toml`, then the environment overlay, then `SHOP__*`
/// environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Account store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Longest accepted session lifetime: ten years.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and environment
    /// variables prefixed with `SHOP__` (e.g. `SHOP__AUTH__JWT_SECRET`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SHOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot safely start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (e.g. via SHOP__AUTH__JWT_SECRET)",
            ));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be greater than zero",
            ));
        }
        if self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        if self.database.backend == StoreBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn with_secret(secret: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = secret.to_string();
        config
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let err = with_secret("").validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);

        let err = with_secret("   ").validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_defaults_are_valid_once_secret_is_set() {
        let config = with_secret("s3cret");
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.auth.store_timeout_seconds, 10);
        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = with_secret("s3cret");
        config.auth.token_ttl_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        let mut config = with_secret("s3cret");
        config.auth.token_ttl_hours = MAX_TOKEN_TTL_HOURS;
        assert!(config.validate().is_ok());

        config.auth.token_ttl_hours = MAX_TOKEN_TTL_HOURS + 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = with_secret("s3cret");
        config.database.backend = StoreBackend::Postgres;
        assert!(config.validate().is_err());

        config.database.url = "postgres://localhost/shop".to_string();
        assert!(config.validate().is_ok());
    }
}
