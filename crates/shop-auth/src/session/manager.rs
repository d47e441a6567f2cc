//! Session lifecycle manager: login and logout.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use shop_core::config::AuthConfig;
use shop_core::error::{AppError, ErrorKind};
use shop_database::AccountStore;
use shop_entity::user::User;

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::revocation::RevocationRegistry;

use super::rejection::Rejection;

/// Message returned for every failed credential check.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The new authoritative session token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Issues sessions on login and revokes them on logout.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for logout.
    jwt_decoder: Arc<JwtDecoder>,
    /// Logout blocklist.
    revocations: Arc<RevocationRegistry>,
    /// Account lookup and authoritative-token persistence.
    accounts: Arc<dyn AccountStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Upper bound for the account lookup.
    lookup_timeout: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("lookup_timeout", &self.lookup_timeout)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationRegistry>,
        accounts: Arc<dyn AccountStore>,
        password_hasher: Arc<PasswordHasher>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            revocations,
            accounts,
            password_hasher,
            lookup_timeout,
        }
    }

    /// Creates a session manager using `auth.store_timeout_seconds`.
    pub fn from_config(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationRegistry>,
        accounts: Arc<dyn AccountStore>,
        password_hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self::new(
            jwt_encoder,
            jwt_decoder,
            revocations,
            accounts,
            password_hasher,
            Duration::from_secs(config.store_timeout_seconds),
        )
    }

    /// Authenticates by email and password and issues a new session.
    ///
    /// The issued token replaces any previous token of the same user, so
    /// earlier sessions stop validating.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = tokio::time::timeout(self.lookup_timeout, self.accounts.find_by_email(email))
            .await
            .map_err(|_| {
                warn!("Account lookup timed out during login");
                AppError::service_unavailable("Account store did not respond in time")
            })??;

        let hasher = Arc::clone(&self.password_hasher);
        let digest = user.as_ref().map(|u| u.password_hash.clone());
        let password = password.to_string();
        let password_ok = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&digest, &password),
            None => hasher.verify_decoy(&password),
        })
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;

        let user = match user {
            Some(user) if password_ok => user,
            Some(user) => {
                warn!(user_id = %user.id, "Login failed: wrong password");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
            None => {
                warn!("Login failed: unknown email");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };

        let issued = self.jwt_encoder.issue(&user.id.to_string(), user.role)?;

        tokio::time::timeout(
            self.lookup_timeout,
            self.accounts.set_token(user.id, &issued.token),
        )
        .await
        .map_err(|_| {
            warn!(user_id = %user.id, "Session token write timed out during login");
            AppError::service_unavailable("Account store did not respond in time")
        })?
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to persist session token");
            AppError::with_source(ErrorKind::Internal, "Failed to persist session token", e)
        })?;

        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.claims.expires_at(),
            user,
        })
    }

    /// Revokes `token` until its own expiry.
    ///
    /// Only decoding is required; a revoked, superseded or expired token can
    /// still be logged out.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        if token.trim().is_empty() {
            return Err(Rejection::MissingCredential.into());
        }

        let claims = self.jwt_decoder.verify(token).map_err(|e| {
            warn!(reason = Rejection::InvalidToken.reason(), error = %e, "Logout rejected");
            AppError::from(Rejection::from(e))
        })?;

        self.revocations.revoke(token, claims.expires_at());

        info!(subject = %claims.sub, "User logged out");
        Ok(())
    }
}
