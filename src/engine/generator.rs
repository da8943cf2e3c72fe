use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Serialize;
use thiserror::Error;

use super::config::GenerationConfig;
use super::decode::{Accumulator, LineBuffer};

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("could not reach generation backend: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("generation backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("generation timed out")]
    Timeout,

    #[error("generation stream failed: {0}")]
    Transport(String),

    #[error("invalid generation client configuration: {0}")]
    Config(String),
}

impl GenerationError {
    fn from_stream(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}

/// Text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Full completion for `prompt`, trimmed. All-or-nothing.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Request body for the local generation service
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    stream: bool,
}

/// Streaming client for an Ollama-style `/api/generate` endpoint
pub struct LlmClient {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl LlmClient {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Config(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_tokens,
            stream: true,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Connect(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status));
        }

        let chunks = response
            .bytes_stream()
            .map(|r| r.map_err(GenerationError::from_stream));
        accumulate(chunks).await
    }
}

/// Drain a byte stream of line-delimited response records into one string.
///
/// Undecodable lines are skipped. The first stream error aborts and drops
/// whatever text had been collected.
pub async fn accumulate<S>(stream: S) -> Result<String, GenerationError>
where
    S: Stream<Item = Result<Bytes, GenerationError>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut lines = LineBuffer::default();
    let mut acc = Accumulator::default();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        acc.absorb_lines(lines.push(&chunk));
    }
    acc.absorb_lines(lines.finish());

    tracing::debug!(
        fragments = acc.fragments(),
        skipped = acc.skipped(),
        "generation stream complete"
    );
    Ok(acc.finish())
}
