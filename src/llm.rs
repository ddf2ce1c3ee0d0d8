//! Model capability boundary.
//!
//! The agent treats the language model as an external capability: it hands
//! over a sequence of role-tagged messages plus stop sequences and gets raw
//! text back. HTTP clients, retries, and streaming live behind this trait in
//! downstream crates; this crate only ships [`ScriptedLlm`], a deterministic
//! double for tests and examples.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::agent::prompt::PromptMessage;

/// A language model that turns a prompt into text.
///
/// Implementations must honor `stop`: generation ends before any stop
/// string appears in the returned text. The agent loop relies on this to
/// keep the model from fabricating its own `Observation:` lines.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, messages: &[PromptMessage], stop: &[String]) -> anyhow::Result<String>;
}

/// Deterministic model double that replays canned replies in order.
///
/// Applies stop-sequence truncation to each reply, mirroring the contract
/// real clients must honor, and records every prompt it receives so tests
/// can assert on what the agent actually sent.
pub struct ScriptedLlm {
    replies: Mutex<Vec<String>>,
    requests: Mutex<Vec<Vec<PromptMessage>>>,
}

impl ScriptedLlm {
    /// Build a double that returns `replies` one per call, in order.
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().map(String::from).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, one entry per `generate` call.
    pub fn requests(&self) -> Vec<Vec<PromptMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of `generate` calls made.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(&self, messages: &[PromptMessage], stop: &[String]) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("ScriptedLlm ran out of replies"))?;

        Ok(truncate_at_stop(&reply, stop))
    }
}

/// Cut `text` just before the earliest occurrence of any stop string.
fn truncate_at_stop(text: &str, stop: &[String]) -> String {
    let cut = stop
        .iter()
        .filter_map(|s| text.find(s.as_str()))
        .min()
        .unwrap_or(text.len());
    text[..cut].to_string()
}
