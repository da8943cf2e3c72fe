use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection, rejection::JsonRejection},
};
use chat_types::InputError;
use std::sync::Arc;

use super::dto::*;
use super::error::ApiError;
use super::state::AppState;

/// POST /get_response - Chat with the assistant
///
/// Empty messages and backend outages still answer 200 with a reply.
pub async fn get_response(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload?;
    let message = payload.message.unwrap_or_default();

    let reply = state.pipeline.respond(&message).await;

    Ok(Json(ChatResponse {
        response: reply.into_text(),
    }))
}

/// POST /ask - Raw retrieval answer with its score
pub async fn ask(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AskForm>, FormRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    // An unreadable form is the same as no question
    let question = form
        .ok()
        .and_then(|Form(f)| f.question)
        .filter(|q| !q.is_empty())
        .ok_or(InputError::MissingQuestion)?;

    let result = state.pipeline.ask(&question).await;
    tracing::info!(score = result.score, "ask answered");

    Ok(Json(AskResponse {
        answer: result.context,
        score: result.score,
    }))
}

/// GET /health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
