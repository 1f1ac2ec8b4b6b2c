//! HTTP handlers for chat endpoints
//!
//! These handlers connect Axum routes to the chat command handler.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;

use crate::application::handlers::chat::{ChatCommand, ChatError, ChatHandler};
use crate::ports::AIProvider;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, ResetResponse, ServiceDescriptor};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct ChatAppState {
    pub chat_handler: Arc<ChatHandler<dyn AIProvider>>,
}

impl ChatAppState {
    pub fn new(chat_handler: Arc<ChatHandler<dyn AIProvider>>) -> Self {
        Self { chat_handler }
    }
}

type HttpError = (StatusCode, Json<ErrorResponse>);

fn map_chat_error(err: ChatError) -> HttpError {
    match err {
        ChatError::Collaborator(source) => {
            tracing::error!(error = %source, retryable = source.is_retryable(), "Chat cycle failed at AI provider");
            (
                StatusCode::BAD_GATEWAY,
                Json(
                    ErrorResponse::bad_gateway(format!("AI provider error: {}", source))
                        .with_details(serde_json::json!({ "retryable": source.is_retryable() })),
                ),
            )
        }
        ChatError::Internal(message) => {
            tracing::error!(error = %message, "Chat cycle failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(message)),
            )
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /
pub async fn service_descriptor() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::default())
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Produce the next assistant reply
///
/// POST /api/chat
pub async fn chat(
    State(app_state): State<ChatAppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, HttpError> {
    let cmd = ChatCommand::new(req.conversation(), req.ui_flags);

    let result = app_state
        .chat_handler
        .handle(cmd)
        .await
        .map_err(map_chat_error)?;

    Ok(Json(ChatResponse {
        response: result.response,
        is_drink_recommendation: result.is_drink_recommendation,
    }))
}

/// The server keeps no conversation state, so reset is an acknowledgement.
///
/// POST /api/reset
pub async fn reset() -> Json<ResetResponse> {
    Json(ResetResponse::default())
}
