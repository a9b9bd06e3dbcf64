//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use super::AppState;
use crate::llm::CompletionRequest;
use crate::prompt;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// 400 body when the message field is missing or empty after trimming
const MISSING_MESSAGE: &str = "Message is required";

/// 500 body for every downstream failure; detail stays in the server log
const DOWNSTREAM_FAILURE: &str = "An error occurred while processing your request";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.as_deref().unwrap_or("").trim();
    if message.is_empty() {
        return Err(AppError::BadRequest(MISSING_MESSAGE.to_string()));
    }

    let Some(llm) = &state.llm else {
        tracing::error!("chat request received but no completion backend is configured");
        return Err(AppError::Internal(DOWNSTREAM_FAILURE.to_string()));
    };

    // Single-turn, no history: the fixed system instruction plus this one
    // user message, with fixed sampling parameters.
    let request = CompletionRequest::single_turn(
        prompt::SYSTEM_PROMPT,
        message,
        prompt::TEMPERATURE,
        prompt::MAX_TOKENS,
    );

    match llm.complete(&request).await {
        Ok(completion) => Ok(Json(ChatResponse {
            response: completion.text,
        })),
        Err(e) => {
            tracing::error!(kind = ?e.kind, error = %e.message, "completion call failed");
            Err(AppError::Internal(DOWNSTREAM_FAILURE.to_string()))
        }
    }
}

// ============================================================
// Health
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("banter ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
