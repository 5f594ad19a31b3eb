//! Scripted LLM for tests and demos.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use polqa_core::{CoreError, Llm, Result};

/// An [`Llm`] that replays a scripted queue of replies and failures.
///
/// Each call to [`complete`](Llm::complete) pops the next scripted
/// outcome; once the queue is empty, the default reply is returned.
/// Runs entirely in-process — no network, no API keys.
///
/// # Example
///
/// ```rust,ignore
/// use polqa_model::MockLlm;
///
/// let llm = MockLlm::new()
///     .with_reply(r#"{"decision": "Covered", "amount": null, "justification": "..."}"#)
///     .with_failure("simulated quota exceeded");
/// ```
pub struct MockLlm {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
    default_reply: String,
}

impl MockLlm {
    /// Create a mock with an empty script and a generic default reply.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            default_reply:
                r#"{"decision": "Unable to determine", "amount": null, "justification": "mock"}"#
                    .to_string(),
        }
    }

    /// Queue a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.lock().expect("mock script lock").push_back(Ok(reply.into()));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().expect("mock script lock").push_back(Err(message.into()));
        self
    }

    /// Replace the reply returned once the script is exhausted.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock prompt lock").clone()
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _system_instruction: &str, prompt: &str) -> Result<String> {
        self.prompts.lock().expect("mock prompt lock").push(prompt.to_string());
        match self.script.lock().expect("mock script lock").pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(CoreError::Model(message)),
            None => Ok(self.default_reply.clone()),
        }
    }
}
