//! In-process stand-ins for the retrieval oracle and the generation backend.

#![allow(dead_code)]

use async_trait::async_trait;
use chat_types::RetrievalResult;
use grounded_chat::engine::{GenerationError, RetrievalError, RetrievalOracle, TextGenerator};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Oracle returning a fixed result (or failing) and counting calls.
pub struct StubOracle {
    result: Option<RetrievalResult>,
    calls: AtomicUsize,
}

impl StubOracle {
    pub fn returning(context: &str, score: f32) -> Self {
        Self {
            result: Some(RetrievalResult::new(context, score)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RetrievalOracle for StubOracle {
    async fn answer(&self, _question: &str) -> Result<RetrievalResult, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .ok_or_else(|| RetrievalError::Malformed("index offline".into()))
    }
}

/// Generator returning a fixed reply (or failing) and recording prompts.
pub struct StubGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn returning(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("generator was never called")
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(GenerationError::Timeout)
    }
}
