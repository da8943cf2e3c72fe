mod config;
pub mod context;
pub mod decode;
pub mod fallback;
pub mod gate;
pub mod generator;
pub mod pipeline;
pub mod retriever;

pub use config::{EngineConfig, GenerationConfig};
pub use generator::{GenerationError, LlmClient, TextGenerator};
pub use pipeline::{ChatPipeline, Stage};
pub use retriever::{DisabledOracle, EmbeddingOracle, RetrievalError, RetrievalOracle};
