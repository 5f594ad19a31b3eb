//! # polqa-rag
//!
//! The retrieval pipeline for policy-document QA: split extracted text
//! into bounded chunks, embed them once per document, and answer
//! queries with the nearest chunks under squared-L2 distance.
//!
//! ## Overview
//!
//! - [`ParagraphChunker`] — blank-line paragraphs, sentence re-split
//!   for long ones, short-fragment noise filter
//! - [`EmbeddingProvider`] — async embedding backend trait
//! - [`VectorIndex`] — exact per-document nearest-neighbor index,
//!   rebuilt wholesale on every ingest
//! - [`Retriever`] — embed query, search, bound snippet size
//! - [`RetrievalConfig`] — validated tuning parameters
//!
//! The chunker runs once per document, the index is built once per
//! document, and every query reuses both. The index is immutable after
//! construction, so concurrent queries against it are safe.

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod retriever;

pub use chunking::{Chunker, ParagraphChunker};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use document::{Chunk, Document, RetrievedChunk};
pub use embedding::{EmbeddingProvider, TermFrequencyEmbedder};
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use retriever::{Retriever, truncate_snippet};
