//! The protocol decoder: raw model text to a structured action.
//!
//! Model output is free text, so the agent's correctness hangs on a small
//! fixed grammar. The parser checks for the final-answer prefix first, then
//! for an `Action:` / `Action Input:` pair. The markers here, the format
//! instructions in [`prompt`](super::prompt), and the `Observation:` stop
//! token form one wire contract and must match verbatim.

use regex::Regex;

use crate::agent::scratchpad::ToolInvocation;
use crate::errors::AgentError;

/// Line prefix signalling the model is done.
pub const FINAL_ANSWER_PREFIX: &str = "Final Answer:";

/// Default stop token handed to the model capability. Generation must end
/// before the model fabricates an observation itself.
pub const OBSERVATION_STOP: &str = "Observation:";

/// Decoded intent from one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentAction {
    /// Invoke a named tool with one input string.
    Invoke(ToolInvocation),
    /// Stop the run and return this final answer.
    Finish { output: String },
}

/// Deterministic decoder for the action grammar.
///
/// Stateless between calls: the same text always decodes to the same
/// action. Regexes are compiled once at construction.
pub struct OutputParser {
    action_re: Regex,
}

impl OutputParser {
    pub fn new() -> Self {
        // Tolerates "Action 2:" style numbering and arbitrary whitespace
        // around the markers; the input payload runs to end of text.
        let action_re =
            Regex::new(r"(?s)Action\s*\d*\s*:[ \t]*(.*?)\s*Action\s*\d*\s*Input\s*\d*\s*:[ \t]*(.*)")
                .expect("action grammar regex is valid");
        Self { action_re }
    }

    /// Decode one model reply.
    ///
    /// A `Final Answer:` occurrence wins over an action pair. Text matching
    /// neither pattern, and tool inputs carrying the literal stop token
    /// (which downstream truncation would corrupt), fail with
    /// [`AgentError::Parse`].
    pub fn parse(&self, text: &str) -> Result<AgentAction, AgentError> {
        if let Some(at) = text.find(FINAL_ANSWER_PREFIX) {
            let output = text[at + FINAL_ANSWER_PREFIX.len()..].trim().to_string();
            return Ok(AgentAction::Finish { output });
        }

        let captures = self.action_re.captures(text).ok_or_else(|| {
            AgentError::parse(
                "expected 'Final Answer:' or an 'Action:'/'Action Input:' pair",
                text,
            )
        })?;

        let tool = captures[1].trim().to_string();
        let input = captures[2].trim().trim_matches('"').to_string();

        if input.contains(OBSERVATION_STOP) {
            return Err(AgentError::parse(
                "tool input contains the reserved 'Observation:' marker",
                text,
            ));
        }

        Ok(AgentAction::Invoke(ToolInvocation::new(tool, input)))
    }
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::new()
    }
}
