use std::path::Path;
use std::sync::Arc;

use knowledge_store::{Embedder, KnowledgeIndex, load_documents};

use crate::config::AppConfig;
use crate::engine::{
    ChatPipeline, DisabledOracle, EmbeddingOracle, EngineConfig, LlmClient, RetrievalOracle,
    TextGenerator,
};

/// Shared state for all handlers
pub struct AppState {
    pub pipeline: ChatPipeline,
}

impl AppState {
    pub fn new(
        oracle: Arc<dyn RetrievalOracle>,
        generator: Arc<dyn TextGenerator>,
        config: EngineConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            pipeline: ChatPipeline::new(oracle, generator, config),
        })
    }

    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Arc<Self>> {
        let oracle = match &config.knowledge_path {
            Some(path) => build_oracle(path).await,
            None => {
                tracing::warn!("no knowledge file configured, retrieval disabled");
                Arc::new(DisabledOracle)
            }
        };

        let llm = LlmClient::new(config.generation.clone())?;
        tracing::info!(
            endpoint = %config.generation.endpoint,
            model = %config.generation.model,
            "generation backend configured"
        );

        Ok(Self::new(oracle, Arc::new(llm), config.engine.clone()))
    }
}

/// Load and embed the knowledge file. Any failure leaves retrieval disabled
/// rather than stopping the server.
async fn build_oracle(path: &Path) -> Arc<dyn RetrievalOracle> {
    let path = path.to_path_buf();
    let built = tokio::task::spawn_blocking(move || -> anyhow::Result<EmbeddingOracle> {
        let documents = load_documents(&path)?;
        let mut embedder = Embedder::new()?;
        let index = KnowledgeIndex::build(documents, &mut embedder)?;
        Ok(EmbeddingOracle::new(Box::new(embedder), index))
    })
    .await;

    match built {
        Ok(Ok(oracle)) => {
            tracing::info!(documents = oracle.documents(), "retrieval enabled");
            Arc::new(oracle)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "failed to build knowledge index, retrieval disabled");
            Arc::new(DisabledOracle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "knowledge index task panicked, retrieval disabled");
            Arc::new(DisabledOracle)
        }
    }
}
