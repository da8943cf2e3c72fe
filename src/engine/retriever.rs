use async_trait::async_trait;
use chat_types::RetrievalResult;
use knowledge_store::{EmbedError, IndexError, KnowledgeIndex, TextEmbedder};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("retrieval is not configured")]
    Disabled,

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("malformed retrieval result: {0}")]
    Malformed(String),
}

/// Black-box source of grounding context.
#[async_trait]
pub trait RetrievalOracle: Send + Sync {
    /// Best-matching context for `question` and its relevance in [0, 1].
    async fn answer(&self, question: &str) -> Result<RetrievalResult, RetrievalError>;
}

/// Reject results that break the oracle contract instead of passing them on.
pub fn validate(result: RetrievalResult) -> Result<RetrievalResult, RetrievalError> {
    if !result.score.is_finite() || !(0.0..=1.0).contains(&result.score) {
        return Err(RetrievalError::Malformed(format!(
            "score {} outside [0, 1]",
            result.score
        )));
    }
    Ok(result)
}

/// Oracle used when no knowledge base is available. Always fails.
#[derive(Debug, Default)]
pub struct DisabledOracle;

#[async_trait]
impl RetrievalOracle for DisabledOracle {
    async fn answer(&self, _question: &str) -> Result<RetrievalResult, RetrievalError> {
        Err(RetrievalError::Disabled)
    }
}

/// Embeds the question and looks up the closest document.
pub struct EmbeddingOracle {
    // Only embedder needs mutation
    embedder: Mutex<Box<dyn TextEmbedder>>,
    index: KnowledgeIndex,
}

impl EmbeddingOracle {
    pub fn new(embedder: Box<dyn TextEmbedder>, index: KnowledgeIndex) -> Self {
        Self {
            embedder: Mutex::new(embedder),
            index,
        }
    }

    pub fn documents(&self) -> usize {
        self.index.len()
    }
}

#[async_trait]
impl RetrievalOracle for EmbeddingOracle {
    async fn answer(&self, question: &str) -> Result<RetrievalResult, RetrievalError> {
        // Lock held for the embedding call only
        let query_embedding = {
            let mut embedder = self.embedder.lock().await;
            embedder.embed_one(question)?
        };

        let hit = self.index.best_match(&query_embedding)?;
        tracing::debug!(score = hit.score, title = ?hit.document.title, "retrieval hit");

        validate(RetrievalResult::new(hit.document.content.clone(), hit.score))
    }
}
