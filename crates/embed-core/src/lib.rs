//! Local sentence-embedding inference using Hugging Face Candle.
//!
//! This crate provides:
//! - The [`EmbeddingModel`] wrapper around a MiniLM BERT encoder
//! - The [`TextEmbedder`] trait the scoring layer depends on
//! - Cosine similarity over embedding vectors

pub mod model;
pub mod similarity;

pub use model::{EmbeddingModel, EMBEDDING_DIM, MAX_SEQ_LEN};
pub use similarity::cosine_similarity;

use anyhow::Result;

/// Anything that can turn a text into a fixed-dimension vector.
///
/// [`EmbeddingModel`] is the production implementation; tests use
/// cheap deterministic stand-ins so scoring logic can be exercised
/// without model weights on disk.
pub trait TextEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimension of the vectors produced by `embed`.
    fn dimension(&self) -> usize;
}
