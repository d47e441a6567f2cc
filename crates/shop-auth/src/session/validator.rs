//! Per-request session token validation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use shop_core::config::AuthConfig;
use shop_database::AccountStore;

use crate::jwt::JwtDecoder;
use crate::rbac::RoleSet;
use crate::revocation::RevocationRegistry;

use super::principal::Principal;
use super::rejection::Rejection;

/// Decides whether a presented token is currently valid for an endpoint.
///
/// Checks run in a fixed order and the first failing check decides the
/// rejection reason. Validation has no side effects.
#[derive(Clone)]
pub struct SessionValidator {
    /// Signature and structure verification.
    decoder: Arc<JwtDecoder>,
    /// Logout blocklist.
    revocations: Arc<RevocationRegistry>,
    /// Source of each account's authoritative token.
    accounts: Arc<dyn AccountStore>,
    /// Upper bound for the account lookup.
    lookup_timeout: Duration,
}

impl std::fmt::Debug for SessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionValidator")
            .field("lookup_timeout", &self.lookup_timeout)
            .finish_non_exhaustive()
    }
}

impl SessionValidator {
    /// Creates a validator.
    pub fn new(
        decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationRegistry>,
        accounts: Arc<dyn AccountStore>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            decoder,
            revocations,
            accounts,
            lookup_timeout,
        }
    }

    /// Creates a validator using `auth.store_timeout_seconds` as the lookup bound.
    pub fn from_config(
        decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationRegistry>,
        accounts: Arc<dyn AccountStore>,
        config: &AuthConfig,
    ) -> Self {
        Self::new(
            decoder,
            revocations,
            accounts,
            Duration::from_secs(config.store_timeout_seconds),
        )
    }

    /// Validates `token` against the current time and the `allowed` roles.
    pub async fn validate(&self, token: &str, allowed: &RoleSet) -> Result<Principal, Rejection> {
        self.validate_at(token, allowed, Utc::now()).await
    }

    /// Validates `token` as if the current time were `now`.
    pub async fn validate_at(
        &self,
        token: &str,
        allowed: &RoleSet,
        now: DateTime<Utc>,
    ) -> Result<Principal, Rejection> {
        match self.check(token, allowed, now).await {
            Ok(principal) => {
                debug!(user_id = %principal.user_id, role = %principal.role, "Session accepted");
                Ok(principal)
            }
            Err(rejection) => {
                warn!(reason = rejection.reason(), "Session rejected");
                Err(rejection)
            }
        }
    }

    async fn check(
        &self,
        token: &str,
        allowed: &RoleSet,
        now: DateTime<Utc>,
    ) -> Result<Principal, Rejection> {
        if token.trim().is_empty() {
            return Err(Rejection::MissingCredential);
        }

        let claims = self.decoder.verify(token)?;

        if self.revocations.is_revoked_at(token, now) {
            return Err(Rejection::Revoked);
        }

        if claims.is_expired_at(now) {
            return Err(Rejection::Expired);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| Rejection::MalformedSubject)?;

        let lookup = tokio::time::timeout(self.lookup_timeout, self.accounts.find_by_id(user_id));
        let user = match lookup.await {
            Err(_) => return Err(Rejection::StoreTimeout),
            Ok(Err(e)) => {
                warn!(user_id = %user_id, error = %e, "Account lookup failed during validation");
                return Err(Rejection::StoreUnavailable);
            }
            Ok(Ok(None)) => return Err(Rejection::UnknownSubject),
            Ok(Ok(Some(user))) => user,
        };

        if !user.holds_token(token) {
            return Err(Rejection::Superseded);
        }

        if !allowed.contains(claims.role) {
            return Err(Rejection::Forbidden);
        }

        Ok(Principal {
            user_id,
            role: claims.role,
        })
    }
}
