//! Command-line and environment configuration for the chat server.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::{EngineConfig, GenerationConfig};

/// Retrieval-grounded chat server backed by a local LLM
#[derive(Parser, Debug, Clone)]
#[command(name = "grounded-chat")]
#[command(version)]
pub struct Args {
    /// Host to bind to
    #[arg(long, env = "CHAT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CHAT_PORT", default_value_t = 10000)]
    pub port: u16,

    /// Streaming generation endpoint
    #[arg(
        long,
        env = "CHAT_GENERATE_URL",
        default_value = "http://localhost:11434/api/generate"
    )]
    pub generate_url: String,

    /// Model identifier sent with every generation request
    #[arg(long, env = "CHAT_MODEL", default_value = "mistral:latest")]
    pub model: String,

    /// Response length cap
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value_t = 300)]
    pub max_tokens: u32,

    /// Total time allowed for one generation, streaming included
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// JSON knowledge file; retrieval is disabled without it
    #[arg(long, env = "CHAT_KNOWLEDGE_PATH")]
    pub knowledge: Option<PathBuf>,
}

/// Resolved configuration for the whole application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    pub engine: EngineConfig,
    pub knowledge_path: Option<PathBuf>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            server: ServerConfig {
                host: args.host,
                port: args.port,
            },
            generation: GenerationConfig {
                endpoint: args.generate_url,
                model: args.model,
                max_tokens: args.max_tokens,
                timeout: Duration::from_secs(args.timeout_secs),
            },
            engine: EngineConfig::default(),
            knowledge_path: args.knowledge,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 10000,
        }
    }
}

impl ServerConfig {
    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
