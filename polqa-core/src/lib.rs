//! # polqa-core
//!
//! Shared vocabulary for the polqa policy-document QA pipeline:
//!
//! - [`AnswerResult`] / [`Decision`] — the canonical query result
//! - [`Llm`] — the completion-backend trait
//! - [`TextExtractor`] / [`DocumentSource`] — the extraction boundary
//! - [`CoreError`] — failures at the external-collaborator boundaries
//!
//! The retrieval pipeline lives in `polqa-rag`, concrete model
//! backends in `polqa-model`, and the session/prompt/normalizer layer
//! in `polqa-agent`.

pub mod answer;
pub mod error;
pub mod extract;
pub mod llm;

pub use answer::{AnswerResult, Decision};
pub use error::{CoreError, Result};
pub use extract::{
    DocumentSource, StaticExtractor, SUPPORTED_EXTENSIONS, TextExtractor, supported_extension,
};
pub use llm::Llm;
