//! Route definitions for chat endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{chat, health, reset, service_descriptor, ChatAppState};

/// Create chat router with all endpoints
///
/// # Endpoints
///
/// - `GET /` - Service descriptor
/// - `GET /health` - Liveness check
/// - `POST /api/chat` - Next assistant reply
/// - `POST /api/reset` - Reset acknowledgement
pub fn routes() -> Router<ChatAppState> {
    Router::new()
        .route("/", get(service_descriptor))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/reset", post(reset))
}
