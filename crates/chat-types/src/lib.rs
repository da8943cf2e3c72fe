//! chat-types: Value types for the grounded chat pipeline
//!
//! Every value here lives for exactly one request. Nothing is persisted and
//! nothing is shared across requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reply for an empty or whitespace-only message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";

/// Reply when the generation backend cannot be reached or fails mid-stream.
pub const MODEL_UNAVAILABLE_REPLY: &str = "Model not available in cloud deployment.";

/// Answer returned by the ask endpoint when retrieval fails.
pub const RAG_UNAVAILABLE_ANSWER: &str = "RAG not available in cloud deployment";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("No question provided")]
    MissingQuestion,
}

/// A user message that is known to contain something other than whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    message: String,
}

impl ChatRequest {
    /// Validate a raw message. Surrounding whitespace is removed.
    pub fn new(raw: &str) -> Result<Self, InputError> {
        let message = raw.trim();
        if message.is_empty() {
            return Err(InputError::EmptyMessage);
        }
        Ok(Self {
            message: message.to_string(),
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Context text and relevance score from the retrieval oracle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResult {
    pub context: String,
    /// Relevance in [0, 1], higher = more relevant
    pub score: f32,
}

impl RetrievalResult {
    pub fn new(context: impl Into<String>, score: f32) -> Self {
        Self {
            context: context.into(),
            score,
        }
    }

    /// The result used in place of a failed retrieval.
    pub fn empty() -> Self {
        Self {
            context: String::new(),
            score: 0.0,
        }
    }
}

/// Fully assembled text sent to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt(String);

impl GenerationPrompt {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for GenerationPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the backend's streamed output.
///
/// Records without a `response` field decode to an empty fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

impl StreamChunk {
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Accumulated backend output (possibly empty)
    Generated,
    /// The message was empty
    EmptyMessage,
    /// The backend failed and the fixed apology was used
    ModelUnavailable,
}

/// The final text returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    text: String,
    source: ReplySource,
}

impl ChatReply {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ReplySource::Generated,
        }
    }

    pub fn empty_message() -> Self {
        Self {
            text: EMPTY_MESSAGE_REPLY.to_string(),
            source: ReplySource::EmptyMessage,
        }
    }

    pub fn model_unavailable() -> Self {
        Self {
            text: MODEL_UNAVAILABLE_REPLY.to_string(),
            source: ReplySource::ModelUnavailable,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> ReplySource {
        self.source
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_trims() {
        let req = ChatRequest::new("  hello there \n").unwrap();
        assert_eq!(req.message(), "hello there");
    }

    #[test]
    fn test_chat_request_rejects_blank() {
        assert_eq!(ChatRequest::new(""), Err(InputError::EmptyMessage));
        assert_eq!(ChatRequest::new(" \t\n "), Err(InputError::EmptyMessage));
    }

    #[test]
    fn test_retrieval_result_empty() {
        let r = RetrievalResult::empty();
        assert_eq!(r.context, "");
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn test_stream_chunk_decodes_response() {
        let chunk = StreamChunk::from_line(r#"{"model":"m","response":"Hel","done":false}"#).unwrap();
        assert_eq!(chunk.response, "Hel");
        assert!(!chunk.done);
    }

    #[test]
    fn test_stream_chunk_missing_response_is_empty() {
        let chunk = StreamChunk::from_line(r#"{"done":true}"#).unwrap();
        assert_eq!(chunk.response, "");
        assert!(chunk.done);
    }

    #[test]
    fn test_stream_chunk_rejects_garbage() {
        assert!(StreamChunk::from_line("not-json").is_err());
        assert!(StreamChunk::from_line("42").is_err());
        assert!(StreamChunk::from_line(r#"{"response":5}"#).is_err());
    }

    #[test]
    fn test_reply_constructors() {
        assert_eq!(ChatReply::empty_message().text(), "Please enter a message.");
        assert_eq!(
            ChatReply::model_unavailable().text(),
            "Model not available in cloud deployment."
        );
        assert_eq!(
            ChatReply::model_unavailable().source(),
            ReplySource::ModelUnavailable
        );
        assert_eq!(ChatReply::generated("").source(), ReplySource::Generated);
    }

    #[test]
    fn test_input_error_messages() {
        assert_eq!(InputError::MissingQuestion.to_string(), "No question provided");
    }
}
