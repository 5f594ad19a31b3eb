//! The completion-backend trait consumed by the QA layer.

use async_trait::async_trait;

use crate::error::Result;

/// A large-language-model completion backend.
///
/// Implementations wrap a specific provider (OpenRouter, a local
/// model, a scripted mock) behind a single blocking-free call. The QA
/// layer treats every failure from [`complete`](Llm::complete) as
/// terminal for that one query — no retries are performed anywhere.
#[async_trait]
pub trait Llm: Send + Sync {
    /// The model identifier, for logging.
    fn name(&self) -> &str;

    /// Produce a completion for `prompt` under `system_instruction`.
    ///
    /// Returns the raw response text; interpreting it is the response
    /// normalizer's job, never the backend's.
    async fn complete(&self, system_instruction: &str, prompt: &str) -> Result<String>;
}
