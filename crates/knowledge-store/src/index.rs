use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::embedder::{EmbedError, TextEmbedder, format_document_for_embedding};

/// Batch size for embedding documents at startup
const EMBEDDING_BATCH_SIZE: usize = 32;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed knowledge file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("embedding error: {0}")]
    Embed(#[from] EmbedError),

    #[error("knowledge index is empty")]
    Empty,

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// One unit of retrievable knowledge.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// Read a JSON array of documents. Entries with blank content are dropped.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>, IndexError> {
    let raw = std::fs::read_to_string(path)?;
    let docs: Vec<Document> = serde_json::from_str(&raw)?;
    Ok(docs
        .into_iter()
        .filter(|d| !d.content.trim().is_empty())
        .collect())
}

/// Best match for a question.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    /// Cosine similarity clamped into [0, 1]
    pub score: f32,
}

/// Documents and their embeddings, held in memory for the process lifetime.
/// Read-only after construction.
pub struct KnowledgeIndex {
    documents: Vec<Document>,
    embeddings: Vec<Vec<f32>>,
    dimension: usize,
}

impl KnowledgeIndex {
    /// Embed every document once.
    pub fn build<E: TextEmbedder + ?Sized>(
        documents: Vec<Document>,
        embedder: &mut E,
    ) -> Result<Self, IndexError> {
        let dimension = embedder.dimension();
        let mut embeddings = Vec::with_capacity(documents.len());

        for batch in documents.chunks(EMBEDDING_BATCH_SIZE) {
            let texts: Vec<String> = batch
                .iter()
                .map(|d| format_document_for_embedding(d.title.as_deref(), &d.content))
                .collect();
            let text_refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
            let batch_embeddings = embedder.embed_batch(&text_refs)?;
            for embedding in &batch_embeddings {
                check_dimension(dimension, embedding)?;
            }
            embeddings.extend(batch_embeddings);
        }

        tracing::info!(documents = documents.len(), dimension, "knowledge index built");

        Ok(Self {
            documents,
            embeddings,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the single most similar document.
    ///
    /// Ties keep the earliest document.
    pub fn best_match(&self, query_embedding: &[f32]) -> Result<ScoredDocument<'_>, IndexError> {
        check_dimension(self.dimension, query_embedding)?;

        let mut best: Option<(usize, f32)> = None;
        for (i, embedding) in self.embeddings.iter().enumerate() {
            let sim = cosine_similarity(query_embedding, embedding);
            if best.is_none_or(|(_, best_sim)| sim > best_sim) {
                best = Some((i, sim));
            }
        }

        let (idx, sim) = best.ok_or(IndexError::Empty)?;
        Ok(ScoredDocument {
            document: &self.documents[idx],
            score: sim.clamp(0.0, 1.0),
        })
    }
}

fn check_dimension(expected: usize, embedding: &[f32]) -> Result<(), IndexError> {
    if embedding.len() != expected {
        return Err(IndexError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }
    Ok(())
}

/// Compute cosine similarity between two vectors.
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}
