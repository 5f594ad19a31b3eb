//! # polqa-model
//!
//! LLM completion backends implementing [`polqa_core::Llm`]:
//!
//! - [`OpenRouterClient`] — any OpenAI-compatible `/chat/completions`
//!   endpoint, OpenRouter by default, with an explicit request timeout
//! - [`MockLlm`] — scripted replies and failures for tests and demos

pub mod mock;
pub mod openrouter;

pub use mock::MockLlm;
pub use openrouter::{OpenRouterClient, OpenRouterConfig};
