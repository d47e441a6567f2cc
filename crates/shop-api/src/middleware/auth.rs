//! Role guard middleware for protected route groups.
//!
//! Runs the session validator on the bearer token and, on acceptance,
//! stores the [`Principal`](shop_auth::Principal) in the request extensions
//! for the [`AuthUser`](crate::extractors::AuthUser) extractor.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use shop_auth::RoleSet;

use crate::error::ApiError;
use crate::extractors::bearer_token;
use crate::state::AppState;

/// Middleware state: the app state plus the roles a route group admits.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    state: AppState,
    allowed: Arc<RoleSet>,
}

impl RoleGuard {
    pub fn new(state: AppState, allowed: RoleSet) -> Self {
        Self {
            state,
            allowed: Arc::new(allowed),
        }
    }
}

/// Rejects the request unless its session token is valid for the guard's roles.
pub async fn require_roles(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).to_owned();

    let principal = guard
        .state
        .session_validator
        .validate(&token, &guard.allowed)
        .await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
