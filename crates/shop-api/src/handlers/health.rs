//! Liveness probe.

use axum::Json;

use crate::dto::response::MessageResponse;

/// GET /ping
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new("pong"))
}
