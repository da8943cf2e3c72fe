//! Turns collaborator failures into safe outcomes.
//!
//! Each function inspects one typed result exactly once. Nothing here
//! returns an error.

use chat_types::{ChatReply, RAG_UNAVAILABLE_ANSWER, RetrievalResult};

use super::generator::GenerationError;
use super::retriever::RetrievalError;

/// Failed retrieval becomes empty context with score 0.
pub fn retrieval_or_empty(result: Result<RetrievalResult, RetrievalError>) -> RetrievalResult {
    match result {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "retrieval unavailable, continuing without context");
            RetrievalResult::empty()
        }
    }
}

/// Failed generation becomes the fixed apology.
pub fn reply_or_unavailable(result: Result<String, GenerationError>) -> ChatReply {
    match result {
        Ok(text) => ChatReply::generated(text),
        Err(e) => {
            tracing::warn!(error = %e, "generation unavailable, using fallback reply");
            ChatReply::model_unavailable()
        }
    }
}

/// Failed retrieval on the ask endpoint becomes the degraded answer.
pub fn answer_or_degraded(result: Result<RetrievalResult, RetrievalError>) -> RetrievalResult {
    match result {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "retrieval unavailable for ask");
            RetrievalResult::new(RAG_UNAVAILABLE_ANSWER, 0.0)
        }
    }
}
