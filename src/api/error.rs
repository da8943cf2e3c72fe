use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API-layer error type. Only input problems reach the client; the chat
/// pipeline itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 - Bad request (missing or empty input)
    #[error("{0}")]
    BadRequest(String),

    /// Body could not be extracted; carries the extractor's own status
    #[error("{1}")]
    Rejected(StatusCode, String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(status, msg) => (status, msg),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<chat_types::InputError> for ApiError {
    fn from(err: chat_types::InputError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
