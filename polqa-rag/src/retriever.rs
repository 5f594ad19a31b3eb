//! Query-time retrieval: embed, search, and bound snippet size.

use std::sync::Arc;

use tracing::debug;

use crate::document::{Chunk, RetrievedChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::VectorIndex;

/// Marker appended to snippets that were cut at the snippet bound.
const ELLIPSIS: &str = "...";

/// Retrieves the chunks nearest a query and bounds their display size.
///
/// Holds the same [`EmbeddingProvider`] the document's index was built
/// with — wiring a different provider here breaks the embedding-space
/// consistency invariant and is a correctness bug.
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    snippet_len: usize,
}

impl Retriever {
    /// Create a retriever over `provider` with the given per-snippet
    /// character bound.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, snippet_len: usize) -> Self {
        Self { provider, snippet_len }
    }

    /// Return up to `k` chunks ranked by ascending distance to `query`,
    /// each truncated to the snippet bound.
    ///
    /// The returned order is semantically meaningful (most relevant
    /// first) and is preserved into the prompt. If the index holds
    /// fewer than `k` vectors, all of them are returned.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures and dimension mismatches; a
    /// degenerate result (fewer than `k` hits) is not an error.
    pub async fn retrieve(
        &self,
        query: &str,
        index: &VectorIndex,
        chunks: &[Chunk],
        k: usize,
    ) -> Result<Vec<RetrievedChunk>> {
        let query_embedding = self.provider.embed(query).await?;
        let hits = index.search(&query_embedding, k)?;

        debug!(hit_count = hits.len(), k, "retrieved chunks");

        Ok(hits
            .into_iter()
            .filter_map(|(ordinal, distance)| {
                chunks.get(ordinal).map(|chunk| RetrievedChunk {
                    ordinal,
                    distance,
                    text: truncate_snippet(&chunk.text, self.snippet_len),
                })
            })
            .collect())
    }
}

/// Truncate `text` to at most `limit` characters, ellipsis included.
///
/// Idempotent: the output never exceeds `limit` characters, so
/// re-applying the same bound is a no-op. Cuts on a char boundary.
/// A limit with no room for the ellipsis marker cuts without one.
pub fn truncate_snippet(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= ELLIPSIS.len() {
        return text.chars().take(limit).collect();
    }
    let keep = limit - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
