use serde::{Deserialize, Serialize};

/// POST /get_response request
#[derive(Debug, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /get_response response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /ask form body
#[derive(Debug, Default, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: Option<String>,
}

/// POST /ask response
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub score: f32,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
