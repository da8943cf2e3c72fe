use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("failed to initialize embedding model: {0}")]
    Init(#[from] anyhow::Error),

    #[error("embedding generation failed: {0}")]
    Embed(String),
}

/// Anything that turns text into fixed-length vectors.
///
/// The index only needs this much, so tests can swap in a cheap embedder
/// instead of loading model weights.
pub trait TextEmbedder: Send {
    fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;

    fn dimension(&self) -> usize;

    /// Embed a single text. Convenience wrapper around batch.
    fn embed_one(&mut self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| EmbedError::Embed("model returned no embedding".into()))
    }
}

/// Wraps fastembed model. Holds loaded model weights in memory.
pub struct Embedder {
    model: TextEmbedding,
    dimension: usize,
}

impl Embedder {
    /// Initialize with BGE-small-en-v1.5 (384 dimensions)
    pub fn new() -> Result<Self, EmbedError> {
        Self::with_model(EmbeddingModel::BGESmallENV15)
    }

    pub fn with_model(model_name: EmbeddingModel) -> Result<Self, EmbedError> {
        let dimension = embedding_dimension(&model_name)?;
        let model =
            TextEmbedding::try_new(InitOptions::new(model_name).with_show_download_progress(true))?;

        Ok(Self { model, dimension })
    }
}

impl TextEmbedder for Embedder {
    fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        self.model
            .embed(texts, None)
            .map_err(|e| EmbedError::Embed(e.to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn embedding_dimension(model: &EmbeddingModel) -> Result<usize, EmbedError> {
    match model {
        EmbeddingModel::BGESmallENV15 => Ok(384),
        EmbeddingModel::BGEBaseENV15 => Ok(768),
        EmbeddingModel::BGELargeENV15 => Ok(1024),
        EmbeddingModel::AllMiniLML6V2 => Ok(384),
        EmbeddingModel::AllMiniLML12V2 => Ok(384),
        other => Err(EmbedError::Embed(format!(
            "unsupported embedding model: {:?}",
            other
        ))),
    }
}

/// Formats a document for embedding. Titles carry strong signal for short
/// questions, so they lead.
pub fn format_document_for_embedding(title: Option<&str>, content: &str) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{}\n{}", t, content),
        _ => content.to_string(),
    }
}
