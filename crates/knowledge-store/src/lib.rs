//! knowledge-store: Embedding-backed document lookup for the chat service
//!
//! Loads a JSON knowledge file, embeds each document once at startup and
//! answers a query embedding with the single closest document.

pub mod embedder;
pub mod index;

pub use embedder::{EmbedError, Embedder, TextEmbedder, format_document_for_embedding};
pub use index::{
    Document, IndexError, KnowledgeIndex, ScoredDocument, cosine_similarity, load_documents,
};
