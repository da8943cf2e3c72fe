//! grounded-chat: Retrieval-grounded chat over a local streaming LLM
//!
//! A message flows through retrieval, a confidence gate, prompt assembly and
//! streaming generation. Every external call is wrapped so the caller always
//! gets a reply string, even when the model or the knowledge index is
//! unreachable.
//!
//! # Modules
//!
//! - [`engine`]: the response-construction pipeline and its collaborators
//! - [`api`]: axum routes exposing chat, ask and health endpoints
//! - [`config`]: command-line and environment settings

pub mod api;
pub mod config;
pub mod engine;

pub use api::{AppState, router};
pub use config::{AppConfig, Args, ServerConfig};
pub use engine::{ChatPipeline, EngineConfig, GenerationConfig};
