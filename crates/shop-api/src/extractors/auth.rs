//! `AuthUser` extractor and bearer token parsing.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use shop_auth::{Principal, Rejection};

use crate::error::ApiError;

/// Returns the token of an `Authorization: Bearer <token>` header.
///
/// A missing header, a non-UTF-8 value or another scheme all yield `""`,
/// which the validator rejects as a missing credential.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
}

/// The principal accepted by the role guard for this request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| Rejection::MissingCredential.into())
    }
}
