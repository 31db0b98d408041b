//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, VersionResponse, GENERIC_ERROR, MESSAGE_REQUIRED,
};
use super::AppState;
use crate::llm::LlmRequest;
use crate::persona;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat proxy
// ============================================================

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = match payload {
        Ok(Json(req)) => req.message.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable chat request body");
            String::new()
        }
    };

    if message.is_empty() {
        tracing::debug!("Rejecting chat request without a message");
        return Err(AppError::BadRequest(MESSAGE_REQUIRED));
    }

    let Some(llm) = state.llm.as_ref() else {
        tracing::error!("No LLM configured; set OPENAI_API_KEY, ANTHROPIC_API_KEY or LLM_GATEWAY");
        return Err(AppError::Upstream);
    };

    let request = LlmRequest::single_turn(persona::system_prompt(), message, state.max_tokens);

    let response = llm.complete(&request).await.map_err(|e| {
        tracing::error!(model = %llm.model_id(), kind = %e.kind, error = %e.message, "Upstream completion failed");
        AppError::Upstream
    })?;

    let Some(reply) = response.reply_text() else {
        tracing::error!(model = %llm.model_id(), "Upstream reply contained no text");
        return Err(AppError::Upstream);
    };

    Ok(Json(ChatResponse { message: reply }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(&'static str),
    /// Any upstream failure. The cause is logged where it happens and never
    /// sent to the caller.
    Upstream,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
