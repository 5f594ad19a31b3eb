//! # polqa-agent
//!
//! The QA layer around the retrieval pipeline:
//!
//! - [`PromptBuilder`] — deterministic instruction template with a
//!   token-budget fallback
//! - [`normalize`] — total conversion of raw model output into the
//!   canonical [`AnswerResult`](polqa_core::AnswerResult)
//! - [`PolicySession`] — the single-document session object exposing
//!   `ingest` / `ask` / `ask_many` / `clear` / `status`

pub mod error;
pub mod normalize;
pub mod prompt;
pub mod session;

pub use error::IngestError;
pub use normalize::normalize;
pub use prompt::{PromptBuilder, ResponseMode, estimate_tokens};
pub use session::{IngestReport, PolicySession, PolicySessionBuilder, SessionStatus};
