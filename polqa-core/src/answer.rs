//! The canonical coverage-decision result returned for every query.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The coverage decision reached for a single query.
///
/// Serialized with the wire strings the downstream consumers expect
/// (`"Not Covered"`, `"Unable to determine"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The queried expense is covered by the policy.
    Covered,
    /// The queried expense is not covered.
    #[serde(rename = "Not Covered")]
    NotCovered,
    /// The queried expense is covered with restrictions or sub-limits.
    #[serde(rename = "Partially Covered")]
    PartiallyCovered,
    /// The retrieved policy text was insufficient to decide.
    #[serde(rename = "Unable to determine")]
    UnableToDetermine,
    /// An external failure (model call, embedding) prevented an answer.
    Error,
}

impl Decision {
    /// Parse a decision string as produced by the model, case-insensitively.
    ///
    /// Returns `None` for strings that match no known decision; callers
    /// treat that the same as a malformed response.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "covered" => Some(Self::Covered),
            "not covered" => Some(Self::NotCovered),
            "partially covered" => Some(Self::PartiallyCovered),
            "unable to determine" => Some(Self::UnableToDetermine),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// The wire string for this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Covered => "Covered",
            Self::NotCovered => "Not Covered",
            Self::PartiallyCovered => "Partially Covered",
            Self::UnableToDetermine => "Unable to determine",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The terminal artifact of one query: a tagged, well-formed answer.
///
/// Every caller-facing ask operation produces exactly one
/// `AnswerResult`; recoverable failures (model errors, malformed model
/// output) are folded into the `decision` field rather than propagated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// The coverage decision. `None` only in plain response mode,
    /// where the model returns a bare string answer.
    pub decision: Option<Decision>,
    /// The coverage amount if the model reported one. Left as a raw
    /// JSON value since models return both strings and numbers here.
    pub amount: Option<Value>,
    /// Free-text explanation grounded in the retrieved excerpts.
    pub justification: String,
}

impl AnswerResult {
    /// An answer with an explicit decision.
    pub fn new(decision: Decision, amount: Option<Value>, justification: impl Into<String>) -> Self {
        Self { decision: Some(decision), amount, justification: justification.into() }
    }

    /// The fallback for responses that could not be interpreted; carries
    /// the original model output for human review.
    pub fn unable(justification: impl Into<String>) -> Self {
        Self::new(Decision::UnableToDetermine, None, justification)
    }

    /// The terminal result for a failed external call.
    pub fn error(description: impl Into<String>) -> Self {
        Self::new(Decision::Error, None, description)
    }

    /// A plain-mode answer: bare text, no decision.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { decision: None, amount: None, justification: text.into() }
    }
}
