//! Data types for documents, chunks, and retrieval results.

use polqa_core::DocumentSource;
use serde::{Deserialize, Serialize};

/// A source document: one opaque text blob plus its identity.
///
/// Created once per ingestion and immutable afterwards. The text is
/// whatever the extraction boundary produced; the pipeline never goes
/// back to the underlying PDF/DOCX/EML.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Where the document came from.
    pub source: DocumentSource,
    /// The extracted plain text.
    pub text: String,
}

impl Document {
    /// Create a document from a source and its extracted text.
    pub fn new(source: DocumentSource, text: impl Into<String>) -> Self {
        Self { source, text: text.into() }
    }
}

/// A contiguous span of document text, the unit of retrieval.
///
/// `ordinal` is the chunk's position in the emission sequence; it is
/// stable for the lifetime of the document's index but carries no
/// meaning beyond insertion order. Chunks are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the chunk sequence, assigned after length filtering.
    pub ordinal: usize,
    /// The chunk text.
    pub text: String,
}

/// A retrieved chunk ranked by distance to the query embedding.
///
/// `text` is the display snippet: the chunk text truncated to the
/// configured snippet length, with an ellipsis marker when truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Ordinal of the underlying chunk.
    pub ordinal: usize,
    /// Squared-L2 distance to the query embedding (lower is closer).
    pub distance: f32,
    /// Snippet text, bounded by the retriever's snippet length.
    pub text: String,
}
