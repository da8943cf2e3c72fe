use std::time::Duration;

use super::context::SYSTEM_PROMPT;
use super::gate::CONFIDENCE_THRESHOLD;

/// RAG pipeline configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Minimum retrieval score for context to reach the prompt
    pub confidence_threshold: f32,
    pub system_prompt: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Where and how to call the local generation service
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    /// Bound on the whole exchange, body streaming included
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".into(),
            model: "mistral:latest".into(),
            max_tokens: 300,
            timeout: Duration::from_secs(120),
        }
    }
}
