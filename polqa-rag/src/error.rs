//! Error types for the `polqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// No index can be built over zero chunks; callers should treat a
    /// chunkless document as "no retrievable content" and short-circuit
    /// queries instead of building.
    #[error("Cannot build an index over zero chunks")]
    EmptyIndex,

    /// A query vector did not match the index dimensionality.
    #[error("Embedding dimension mismatch: index holds {expected}, query has {actual}")]
    DimensionMismatch {
        /// The dimensionality the index was built with.
        expected: usize,
        /// The dimensionality of the offending vector.
        actual: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
