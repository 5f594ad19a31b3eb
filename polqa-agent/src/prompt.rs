//! Deterministic prompt construction with a token-budget fallback.
//!
//! The prompt template enumerates retrieved excerpts in retrieval
//! order (most relevant first — the order is semantically meaningful)
//! and ends with an output-format instruction selected by the
//! configured [`ResponseMode`]. Prompt size is estimated with a fixed
//! 4-characters-per-token approximation; oversized prompts degrade to
//! a minimal single-excerpt form rather than being rejected by the
//! completion backend.

use std::fmt::Write as _;

use polqa_rag::{RetrievedChunk, truncate_snippet};
use tracing::debug;

/// How the model is instructed to shape its reply, and therefore how
/// the normalizer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// A JSON object with `decision`, `amount`, and `justification`.
    #[default]
    Json,
    /// A single plain-text answer; the result carries no decision.
    Plain,
}

/// Builds the instruction prompt from a query and retrieved excerpts.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    mode: ResponseMode,
    token_ceiling: usize,
    fallback_snippet_len: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self { mode: ResponseMode::Json, token_ceiling: 8000, fallback_snippet_len: 300 }
    }
}

impl PromptBuilder {
    /// A builder with the default ceiling (8000 estimated tokens) and
    /// fallback excerpt bound (300 characters) in the given mode.
    pub fn new(mode: ResponseMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Override the estimated-token ceiling.
    pub fn with_token_ceiling(mut self, ceiling: usize) -> Self {
        self.token_ceiling = ceiling;
        self
    }

    /// Override the fallback excerpt bound.
    pub fn with_fallback_snippet_len(mut self, len: usize) -> Self {
        self.fallback_snippet_len = len;
        self
    }

    /// The configured response mode.
    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Build the prompt for `query` over `retrieved`.
    ///
    /// If the full prompt's estimated token count exceeds the ceiling,
    /// a minimal prompt is built instead from only the highest-ranked
    /// excerpt, truncated further. The fallback is gated by the size
    /// check, so applying it to an already-short prompt is a no-op.
    pub fn build(&self, query: &str, retrieved: &[RetrievedChunk]) -> String {
        let full = self.render_full(query, retrieved);
        let estimated = estimate_tokens(&full);
        if estimated <= self.token_ceiling || retrieved.is_empty() {
            return full;
        }

        debug!(estimated, ceiling = self.token_ceiling, "prompt over budget, using minimal form");
        self.render_minimal(query, &retrieved[0])
    }

    fn render_full(&self, query: &str, retrieved: &[RetrievedChunk]) -> String {
        let mut prompt = String::new();
        match self.mode {
            ResponseMode::Json => {
                prompt.push_str("Based on these document excerpts, answer the query in JSON format.\n\n");
            }
            ResponseMode::Plain => {
                prompt.push_str("Based on these document excerpts, answer the query.\n\n");
            }
        }
        let _ = writeln!(prompt, "Query: {query}");
        prompt.push_str("\nDocument excerpts:\n");
        for (i, chunk) in retrieved.iter().enumerate() {
            let _ = writeln!(prompt, "{}. {}", i + 1, chunk.text);
        }
        match self.mode {
            ResponseMode::Json => {
                prompt.push_str(
                    "\nResponse format:\n\
                     {\n\
                     \x20   \"decision\": \"Covered/Not Covered/Partially Covered/Unable to determine\",\n\
                     \x20   \"amount\": \"coverage amount or null\",\n\
                     \x20   \"justification\": \"brief explanation based on excerpts\"\n\
                     }\n\n\
                     Base answer only on provided excerpts.",
                );
            }
            ResponseMode::Plain => {
                prompt.push_str(
                    "\nRespond with a single plain-text answer. \
                     Base answer only on provided excerpts.",
                );
            }
        }
        prompt
    }

    fn render_minimal(&self, query: &str, top: &RetrievedChunk) -> String {
        let excerpt = truncate_snippet(&top.text, self.fallback_snippet_len);
        match self.mode {
            ResponseMode::Json => format!(
                "Based on this document excerpt, answer in JSON format.\n\n\
                 Query: {query}\n\n\
                 Excerpt: {excerpt}\n\n\
                 Format: {{\"decision\": \"...\", \"amount\": \"...\", \"justification\": \"...\"}}"
            ),
            ResponseMode::Plain => format!(
                "Based on this document excerpt, answer the query.\n\n\
                 Query: {query}\n\n\
                 Excerpt: {excerpt}\n\n\
                 Respond with a single plain-text answer."
            ),
        }
    }
}

/// Estimate the token count of `prompt` with the fixed approximation
/// of one token per four characters.
pub fn estimate_tokens(prompt: &str) -> usize {
    prompt.chars().count() / 4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retrieved(texts: &[&str]) -> Vec<RetrievedChunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| RetrievedChunk {
                ordinal: i,
                distance: i as f32,
                text: (*text).to_string(),
            })
            .collect()
    }

    #[test]
    fn enumerates_excerpts_in_retrieval_order() {
        let builder = PromptBuilder::default();
        let prompt = builder.build(
            "What is the waiting period for cataract surgery?",
            &retrieved(&["first excerpt", "second excerpt"]),
        );

        assert!(prompt.contains("Query: What is the waiting period for cataract surgery?"));
        let first = prompt.find("1. first excerpt").expect("first excerpt missing");
        let second = prompt.find("2. second excerpt").expect("second excerpt missing");
        assert!(first < second);
        assert!(prompt.contains("\"decision\""));
        assert!(prompt.contains("Base answer only on provided excerpts."));
    }

    #[test]
    fn plain_mode_asks_for_plain_text() {
        let builder = PromptBuilder::new(ResponseMode::Plain);
        let prompt = builder.build("query", &retrieved(&["excerpt"]));
        assert!(prompt.contains("Respond with a single plain-text answer."));
        assert!(!prompt.contains("JSON"));
    }

    #[test]
    fn under_ceiling_prompt_is_unchanged() {
        let builder = PromptBuilder::default();
        let chunks = retrieved(&["a short excerpt about coverage terms"]);
        let prompt = builder.build("query", &chunks);
        assert!(estimate_tokens(&prompt) <= 8000);
        assert!(prompt.contains("1. a short excerpt"));
    }

    #[test]
    fn over_ceiling_prompt_falls_back_to_single_truncated_excerpt() {
        // Low ceiling forces the fallback deterministically.
        let builder = PromptBuilder::default().with_token_ceiling(50);
        let top = "c".repeat(2000);
        let second = "Z".repeat(2000);
        let prompt = builder.build("query", &retrieved(&[&top, &second]));

        assert!(prompt.starts_with("Based on this document excerpt"));
        assert!(!prompt.contains('Z'), "fallback must drop all but the top excerpt");
        // 300-char excerpt bound, ellipsis included.
        assert!(prompt.contains(&format!("Excerpt: {}...", "c".repeat(297))));
    }

    #[test]
    fn fallback_is_idempotent_on_short_prompts() {
        let builder = PromptBuilder::default();
        let chunks = retrieved(&["short excerpt"]);
        assert_eq!(builder.build("query", &chunks), builder.build("query", &chunks));
    }

    #[test]
    fn empty_retrieval_still_renders() {
        let builder = PromptBuilder::default();
        let prompt = builder.build("query", &[]);
        assert!(prompt.contains("Query: query"));
        assert!(prompt.contains("Document excerpts:"));
    }

    #[test]
    fn token_estimate_is_quarter_of_chars() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens(&"x".repeat(32004)), 8001);
    }
}
