//! Normalizing raw model output into the canonical [`AnswerResult`].
//!
//! Models wrap JSON in markdown fences, emit malformed JSON, or answer
//! in free text. Normalization never fails: every input string maps to
//! a structurally valid result, with parse failure folded into the
//! "Unable to determine" decision carrying the original text for human
//! review.
//!
//! Fence extraction follows a fixed precedence: a JSON-tagged fence
//! wins over a generic fence, which wins over the raw text.

use polqa_core::{AnswerResult, Decision};
use serde::Deserialize;
use serde_json::Value;

use crate::prompt::ResponseMode;

/// The object shape the model is instructed to produce.
#[derive(Debug, Deserialize)]
struct RawAnswer {
    decision: Option<String>,
    #[serde(default)]
    amount: Option<Value>,
    justification: Option<String>,
}

/// Convert raw model output into a well-formed [`AnswerResult`].
///
/// Total over all inputs — garbage, partial fences, and the empty
/// string all produce a valid result, never an error.
pub fn normalize(raw: &str, mode: ResponseMode) -> AnswerResult {
    match mode {
        ResponseMode::Json => normalize_json(raw),
        ResponseMode::Plain => AnswerResult::plain(strip_fence(raw)),
    }
}

fn normalize_json(raw: &str) -> AnswerResult {
    let candidate = extract_candidate(raw);

    let Ok(parsed) = serde_json::from_str::<RawAnswer>(candidate) else {
        return AnswerResult::unable(raw);
    };

    // A parseable object with an unrecognized (or missing) decision is
    // treated the same as malformed output.
    let Some(decision) = parsed.decision.as_deref().and_then(Decision::parse) else {
        return AnswerResult::unable(raw);
    };

    let amount = parsed.amount.filter(|v| !v.is_null());
    AnswerResult::new(decision, amount, parsed.justification.unwrap_or_default())
}

/// The text to attempt JSON parsing on: a JSON-tagged fenced block if
/// present, else the first generic fenced block, else the raw text.
fn extract_candidate(raw: &str) -> &str {
    if let Some(content) = fenced_block(raw, "```json") {
        return content;
    }
    if let Some(content) = fenced_block(raw, "```") {
        return content;
    }
    raw
}

/// The trimmed content between `open` and the next closing triple
/// backtick. Returns `None` when the fence is absent or unclosed.
fn fenced_block<'a>(raw: &'a str, open: &str) -> Option<&'a str> {
    let start = raw.find(open)? + open.len();
    let end = raw[start..].find("```")? + start;
    Some(raw[start..end].trim())
}

/// Plain-mode cleanup: trim whitespace and strip one surrounding
/// triple-backtick fence (with optional language tag) if present.
fn strip_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // Drop the language tag line, if any.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim().to_string()
}
