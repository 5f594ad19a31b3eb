//! Error types for the `polqa-agent` crate.

use polqa_rag::RagError;
use thiserror::Error;

/// Failures while ingesting a document.
///
/// Ingest errors are reported to the caller immediately and abort the
/// ingest; the previously loaded document (if any) is left untouched.
/// Ask operations never produce these — recoverable query-time
/// failures are folded into the `AnswerResult` instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Downloading the source document failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// The source names a format the pipeline does not accept.
    #[error("Unsupported document type: '{extension}'. Only PDF, DOCX, EML are supported.")]
    UnsupportedFormat {
        /// The offending extension (possibly empty).
        extension: String,
    },

    /// Extraction succeeded but produced no text.
    #[error("Document contained no extractable text")]
    EmptyDocument,

    /// Parsing the document into text failed.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Chunk embedding or index construction failed.
    #[error(transparent)]
    Rag(#[from] RagError),
}
