//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Tuning parameters for chunking and retrieval.
///
/// The defaults are the production values: paragraphs over 800
/// characters are re-split on sentence boundaries, chunks under 50
/// characters are dropped as noise, 2 chunks are retrieved per query,
/// and each retrieved snippet is bounded to 500 characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Paragraphs longer than this are split on sentence boundaries.
    pub long_paragraph_len: usize,
    /// Chunks with trimmed length below this are dropped as noise
    /// (page headers, stray whitespace).
    pub min_chunk_len: usize,
    /// Number of chunks retrieved per query.
    pub top_k: usize,
    /// Maximum characters per retrieved snippet, ellipsis included.
    pub snippet_len: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { long_paragraph_len: 800, min_chunk_len: 50, top_k: 2, snippet_len: 500 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the long-paragraph threshold in characters.
    pub fn long_paragraph_len(mut self, len: usize) -> Self {
        self.config.long_paragraph_len = len;
        self
    }

    /// Set the minimum retained chunk length in characters.
    pub fn min_chunk_len(mut self, len: usize) -> Self {
        self.config.min_chunk_len = len;
        self
    }

    /// Set the number of chunks retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the per-snippet character bound.
    pub fn snippet_len(mut self, len: usize) -> Self {
        self.config.snippet_len = len;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are
    /// consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `min_chunk_len >= long_paragraph_len`
    /// - `top_k == 0`
    /// - `snippet_len <= 3` (no room for the ellipsis marker)
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.min_chunk_len >= self.config.long_paragraph_len {
            return Err(RagError::Config(format!(
                "min_chunk_len ({}) must be less than long_paragraph_len ({})",
                self.config.min_chunk_len, self.config.long_paragraph_len
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.snippet_len <= 3 {
            return Err(RagError::Config(format!(
                "snippet_len ({}) must leave room for the ellipsis marker",
                self.config.snippet_len
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_production() {
        let config = RetrievalConfig::default();
        assert_eq!(config.long_paragraph_len, 800);
        assert_eq!(config.min_chunk_len, 50);
        assert_eq!(config.top_k, 2);
        assert_eq!(config.snippet_len, 500);
    }

    #[test]
    fn builder_rejects_inverted_lengths() {
        let result = RetrievalConfig::builder().min_chunk_len(900).long_paragraph_len(800).build();
        assert!(matches!(result, Err(RagError::Config(_))));
    }

    #[test]
    fn builder_rejects_zero_top_k() {
        let result = RetrievalConfig::builder().top_k(0).build();
        assert!(matches!(result, Err(RagError::Config(_))));
    }

    #[test]
    fn builder_rejects_tiny_snippet() {
        let result = RetrievalConfig::builder().snippet_len(3).build();
        assert!(matches!(result, Err(RagError::Config(_))));
    }

    #[test]
    fn builder_accepts_custom_values() {
        let config = RetrievalConfig::builder()
            .long_paragraph_len(400)
            .min_chunk_len(20)
            .top_k(5)
            .snippet_len(200)
            .build()
            .unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.snippet_len, 200);
    }
}
