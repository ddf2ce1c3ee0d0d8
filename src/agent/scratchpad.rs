//! Scratchpad rendering: the textual history of prior (action, observation)
//! pairs within one run.
//!
//! The scratchpad is never shown to the model as structured data; it is
//! rendered to one text block per iteration, in step order, using the same
//! `Action:` / `Action Input:` / `Observation:` markers the format
//! instructions teach. A disclaimer prefix signals that the block is a
//! summary the model has not literally seen rendered live.

/// Disclaimer prepended to a non-empty scratchpad.
pub const SCRATCHPAD_DISCLAIMER: &str = "This was your previous work (but I haven't seen any of it! I only see what you return as final answer):\n";

/// Prefix the observation text is appended with.
pub const OBSERVATION_PREFIX: &str = "Observation: ";

/// Prefix inviting the model's next reasoning step.
pub const THOUGHT_PREFIX: &str = "Thought:";

/// A decoded tool invocation: one named tool, one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: String,
    pub input: String,
}

impl ToolInvocation {
    pub fn new(tool: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            input: input.into(),
        }
    }

    /// Canonical textual form, matching the grammar the parser decodes.
    pub fn render(&self) -> String {
        format!("Action: {}\nAction Input: {}", self.tool, self.input)
    }
}

/// One completed loop iteration. Appended atomically, only after both the
/// action and its observation are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStep {
    pub action: ToolInvocation,
    pub observation: String,
}

/// Render the ordered step history to a single text block.
///
/// Empty history renders to the empty string (no placeholder) so the
/// human-message template collapses cleanly around it. Idempotent: no
/// counters, timestamps, or other hidden state.
pub fn render_scratchpad(steps: &[AgentStep]) -> String {
    if steps.is_empty() {
        return String::new();
    }

    let mut rendered = String::from(SCRATCHPAD_DISCLAIMER);
    for step in steps {
        rendered.push_str(&step.action.render());
        rendered.push('\n');
        rendered.push_str(OBSERVATION_PREFIX);
        rendered.push_str(&step.observation);
        rendered.push('\n');
        rendered.push_str(THOUGHT_PREFIX);
    }
    rendered
}
