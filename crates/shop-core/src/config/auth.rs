//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication, token and revocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must be non-empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Upper bound for a single account store lookup, in seconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_seconds: u64,
    /// Interval between revocation registry sweeps, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub revocation_sweep_interval_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
            store_timeout_seconds: default_store_timeout(),
            revocation_sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24
}

fn default_store_timeout() -> u64 {
    10
}

fn default_sweep_interval() -> u64 {
    300
}
