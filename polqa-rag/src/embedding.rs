//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::{RagError, Result};

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap specific embedding backends behind a unified
/// async interface. The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// implementation calls [`embed`](EmbeddingProvider::embed) sequentially;
/// backends that support native batching should override it.
///
/// Embedding-space consistency is a correctness invariant: the same
/// provider instance must be used both to build a document's index and
/// to embed queries against it. Mixing providers between build and
/// query is a bug, not merely a quality degradation.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// sequentially for each input. Override this method if the backend
    /// supports native batch embedding for better throughput.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

/// A deterministic bag-of-words embedder over a fixed vocabulary.
///
/// Dimension `i` counts case-insensitive occurrences of vocabulary
/// term `i` in the input. Queries and chunks sharing terms therefore
/// land near each other under L2 distance. No network, no model
/// weights — intended for tests and demos, not production retrieval.
///
/// # Example
///
/// ```rust,ignore
/// use polqa_rag::TermFrequencyEmbedder;
///
/// let embedder = TermFrequencyEmbedder::new(["cataract", "maternity", "waiting"]);
/// let vector = embedder.embed("What is the waiting period for cataract surgery?").await?;
/// assert_eq!(vector, vec![1.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct TermFrequencyEmbedder {
    vocabulary: Vec<String>,
}

impl TermFrequencyEmbedder {
    /// Create an embedder over the given vocabulary. Dimensionality
    /// equals the number of terms.
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vocabulary: vocabulary.into_iter().map(|s| s.into().to_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for TermFrequencyEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.vocabulary.is_empty() {
            return Err(RagError::Embedding {
                provider: "TermFrequency".to_string(),
                message: "vocabulary is empty".to_string(),
            });
        }
        let lowered = text.to_lowercase();
        Ok(self
            .vocabulary
            .iter()
            .map(|term| lowered.matches(term.as_str()).count() as f32)
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_terms_case_insensitively() {
        let embedder = TermFrequencyEmbedder::new(["cataract", "waiting period"]);
        let vector = embedder
            .embed("Cataract surgery has a waiting period of two years. The waiting period applies.")
            .await
            .unwrap();
        assert_eq!(vector, vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn batch_matches_singles() {
        let embedder = TermFrequencyEmbedder::new(["grace", "premium"]);
        let texts = ["grace period", "premium payment premium"];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed(texts[0]).await.unwrap());
        assert_eq!(batch[1], embedder.embed(texts[1]).await.unwrap());
    }

    #[tokio::test]
    async fn empty_vocabulary_is_an_error() {
        let embedder = TermFrequencyEmbedder::new(Vec::<String>::new());
        assert!(matches!(
            embedder.embed("anything").await,
            Err(RagError::Embedding { .. })
        ));
    }
}
