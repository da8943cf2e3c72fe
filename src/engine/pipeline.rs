use std::sync::Arc;

use chat_types::{ChatReply, ChatRequest, RetrievalResult};
use tracing::Instrument;
use uuid::Uuid;

use super::config::EngineConfig;
use super::context::build_prompt;
use super::fallback;
use super::gate::{gate, gated_context};
use super::generator::TextGenerator;
use super::retriever::{RetrievalOracle, validate};

/// Stages a chat request moves through, strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Retrieving,
    Gating,
    Prompting,
    Generating,
    Done,
}

/// Orchestrates retrieval, gating, prompting and generation for one message.
///
/// Holds only shared read-only handles, so one instance serves concurrent
/// requests without locking.
#[derive(Clone)]
pub struct ChatPipeline {
    oracle: Arc<dyn RetrievalOracle>,
    generator: Arc<dyn TextGenerator>,
    config: EngineConfig,
}

impl ChatPipeline {
    pub fn new(
        oracle: Arc<dyn RetrievalOracle>,
        generator: Arc<dyn TextGenerator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            oracle,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce a reply for a raw user message. Never fails.
    pub async fn respond(&self, raw_message: &str) -> ChatReply {
        let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
        self.run(raw_message).instrument(span).await
    }

    async fn run(&self, raw_message: &str) -> ChatReply {
        enter(Stage::Received);
        let request = match ChatRequest::new(raw_message) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(reason = %e, "short-circuit");
                enter(Stage::Done);
                return ChatReply::empty_message();
            }
        };

        enter(Stage::Retrieving);
        let retrieved = self.retrieve(request.message()).await;

        enter(Stage::Gating);
        let included = gate(retrieved.score, self.config.confidence_threshold);
        tracing::info!(score = retrieved.score, included, "retrieval gated");
        let context = gated_context(&retrieved, self.config.confidence_threshold);

        enter(Stage::Prompting);
        let prompt = build_prompt(&self.config.system_prompt, request.message(), context);

        enter(Stage::Generating);
        let generated = self.generator.generate(prompt.as_str()).await;
        let reply = fallback::reply_or_unavailable(generated);

        enter(Stage::Done);
        tracing::info!(source = ?reply.source(), chars = reply.text().len(), "reply ready");
        reply
    }

    async fn retrieve(&self, question: &str) -> RetrievalResult {
        let result = self.oracle.answer(question).await.and_then(validate);
        fallback::retrieval_or_empty(result)
    }

    /// Raw retrieval for the ask endpoint: no gating, degraded on failure.
    pub async fn ask(&self, question: &str) -> RetrievalResult {
        let result = self.oracle.answer(question).await.and_then(validate);
        fallback::answer_or_degraded(result)
    }
}

fn enter(stage: Stage) {
    tracing::trace!(?stage, "pipeline stage");
}
