//! Per-document vector index with exact squared-L2 search.
//!
//! One [`VectorIndex`] is owned by exactly one document and is rebuilt
//! from scratch on every ingest — there is no incremental update.
//! Embeddings are computed once at build time and reused for every
//! query against the document, trading memory for query latency.

use tracing::debug;

use crate::document::Chunk;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// An exact nearest-neighbor index over a document's chunk embeddings.
///
/// Row `i` is the embedding of the chunk with ordinal `i`. Immutable
/// once built; search never mutates, so a shared reference can serve
/// any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Embed `chunks` in input order and build the index.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyIndex`] if `chunks` is empty — callers must
    ///   treat a chunkless document as "no retrievable content" and
    ///   short-circuit queries instead of building.
    /// - [`RagError::Embedding`] if the provider fails or returns a
    ///   vector of unexpected dimensionality.
    pub async fn build(provider: &dyn EmbeddingProvider, chunks: &[Chunk]) -> Result<Self> {
        if chunks.is_empty() {
            return Err(RagError::EmptyIndex);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = provider.embed_batch(&texts).await?;
        let dimensions = provider.dimensions();

        for (ordinal, vector) in vectors.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(RagError::Embedding {
                    provider: "index build".to_string(),
                    message: format!(
                        "chunk {ordinal} embedded to {} dimensions, expected {dimensions}",
                        vector.len()
                    ),
                });
            }
        }

        debug!(chunk_count = vectors.len(), dimensions, "built vector index");
        Ok(Self { dimensions, vectors })
    }

    /// Number of vectors held by the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors. Always `false` for an index
    /// produced by [`build`](VectorIndex::build).
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The dimensionality the index was built with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return up to `k` chunk ordinals by ascending squared-L2 distance
    /// to `query`. If the index holds fewer than `k` vectors, all of
    /// them are returned, ranked.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if `query` does not
    /// match the index dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(ordinal, vector)| (ordinal, squared_l2(vector, query)))
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::TermFrequencyEmbedder;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(ordinal, text)| Chunk { ordinal, text: (*text).to_string() })
            .collect()
    }

    #[tokio::test]
    async fn build_rejects_empty_chunks() {
        let embedder = TermFrequencyEmbedder::new(["term"]);
        let result = VectorIndex::build(&embedder, &[]).await;
        assert!(matches!(result, Err(RagError::EmptyIndex)));
    }

    #[tokio::test]
    async fn search_ranks_by_ascending_distance() {
        let embedder = TermFrequencyEmbedder::new(["cataract", "maternity"]);
        let chunks = chunks(&[
            "Maternity expenses are covered after 24 months.",
            "Cataract surgery has a waiting period of two years.",
        ]);
        let index = VectorIndex::build(&embedder, &chunks).await.unwrap();
        assert_eq!(index.len(), 2);

        let query = embedder.embed("waiting period for cataract surgery").await.unwrap();
        let hits = index.search(&query, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, 1, "cataract chunk should rank first");
        assert!(hits[0].1 <= hits[1].1);
    }

    #[tokio::test]
    async fn search_with_k_over_len_returns_all() {
        let embedder = TermFrequencyEmbedder::new(["room", "rent"]);
        let chunks = chunks(&["Room rent is limited to one percent of the sum insured."]);
        let index = VectorIndex::build(&embedder, &chunks).await.unwrap();

        let query = embedder.embed("room rent limit").await.unwrap();
        let hits = index.search(&query, 10).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn search_rejects_dimension_mismatch() {
        let embedder = TermFrequencyEmbedder::new(["a", "b"]);
        let chunks = chunks(&["some policy text about a and b"]);
        let index = VectorIndex::build(&embedder, &chunks).await.unwrap();

        let result = index.search(&[1.0, 2.0, 3.0], 1);
        assert!(matches!(
            result,
            Err(RagError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }
}
