//! Session token creation with HMAC-SHA256 signing and a fixed lifetime.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use shop_core::config::AuthConfig;
use shop_core::error::AppError;
use shop_entity::user::UserRole;

use super::claims::{Claims, IssuedToken};

/// Creates signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Time between issuance and expiry.
    lifetime: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// An empty secret is a configuration error.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("JWT signing secret is empty"));
        }
        let lifetime = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| AppError::configuration("auth.token_ttl_hours is out of range"))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            lifetime,
        })
    }

    /// Issues a token for `subject` with `role`, valid from now.
    pub fn issue(&self, subject: &str, role: UserRole) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat,
            exp: iat + self.lifetime.num_seconds(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken { token, claims })
    }
}
