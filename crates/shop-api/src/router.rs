//! Route definitions for the Shop Online HTTP API.
//!
//! Routes are grouped by the roles they admit. Each protected group carries
//! its own [`RoleGuard`] as a route layer.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use shop_auth::RoleSet;

use crate::handlers;
use crate::middleware;
use crate::middleware::auth::RoleGuard;
use crate::state::AppState;

/// Build the Axum router with all routes and the access log.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(account_routes(&state))
        .merge(admin_routes(&state))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Unauthenticated endpoints. Logout only needs a decodable token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Any signed-in role.
fn account_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            RoleGuard::new(state.clone(), RoleSet::any_user()),
            middleware::auth::require_roles,
        ))
}

/// Administrators only.
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            put(handlers::user::update_user).delete(handlers::user::delete_user),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            RoleGuard::new(state.clone(), RoleSet::admin_only()),
            middleware::auth::require_roles,
        ))
}
