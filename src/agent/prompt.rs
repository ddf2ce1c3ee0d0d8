//! Prompt assembly: role-tagged messages and the chat prompt template.
//!
//! The template is compiled once per agent from the config strings and the
//! tool catalog, then filled per iteration with the task input and the
//! rendered scratchpad. The default strings are part of the wire contract
//! with [`OutputParser`](super::parser::OutputParser): the format
//! instructions teach the model the exact `Action:` / `Action Input:` /
//! `Final Answer:` grammar the parser inverts.

use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;
use crate::errors::AgentError;
use crate::tools::ToolCatalog;

/// Default system message prefix, ahead of the tool description block.
pub const SYSTEM_MESSAGE_PREFIX: &str =
    "Answer the following questions as best you can. You have access to the following tools:";

/// Default format instructions. `{tool_names}` is substituted with the
/// catalog's comma-joined name list when the template is built.
pub const FORMAT_INSTRUCTIONS: &str = "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question";

/// Default system message suffix.
pub const SYSTEM_MESSAGE_SUFFIX: &str =
    "Begin! Reminder to always use the exact characters `Final Answer` when responding.";

/// Default human message. Holds the two runtime substitution slots.
pub const HUMAN_MESSAGE: &str = "{input}\n\n{agent_scratchpad}";

/// Placeholder recognized inside the format instructions.
pub const TOOL_NAMES_PLACEHOLDER: &str = "{tool_names}";

/// Scripted acknowledgment used in place of an unsupported system role.
pub const SYSTEM_ROLE_FALLBACK_ACK: &str = "YES, I Know.";

/// Message role. Serialized lowercase for wire-format model clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Ai,
}

/// One role-tagged segment of the prompt. Sequence order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
        }
    }
}

/// Compiled message sequence with named runtime substitution slots.
///
/// Built once per agent; immutable and safely shared across concurrent
/// runs. `format` fills the slots for one specific iteration.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    messages: Vec<PromptMessage>,
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Assemble the template from the config strings and the catalog.
    ///
    /// Body = double-newline join of [prefix, tool descriptions, format
    /// instructions with `{tool_names}` filled, suffix]. With
    /// `use_system_role` set the body rides in a leading system message;
    /// otherwise it is sent as a human turn followed by a scripted
    /// acknowledgment, for models that reject a leading system role.
    pub fn build(tools: &ToolCatalog, config: &AgentConfig) -> Self {
        let tool_descriptions = tools.render_descriptions();
        let format_instructions = config
            .format_instructions
            .replace(TOOL_NAMES_PLACEHOLDER, &tools.render_names());

        let body = [
            config.system_message_prefix.as_str(),
            tool_descriptions.as_str(),
            format_instructions.as_str(),
            config.system_message_suffix.as_str(),
        ]
        .join("\n\n");

        let messages = if config.use_system_role {
            vec![
                PromptMessage::system(body),
                PromptMessage::human(&config.human_message),
            ]
        } else {
            vec![
                PromptMessage::human(body),
                PromptMessage::ai(SYSTEM_ROLE_FALLBACK_ACK),
                PromptMessage::human(&config.human_message),
            ]
        };

        Self {
            messages,
            input_variables: config.input_variables.clone(),
        }
    }

    /// Fill every declared `{variable}` slot with its runtime value.
    ///
    /// Every declared variable must be supplied, else the template would
    /// silently ship a literal placeholder to the model. Substitution is a
    /// single left-to-right pass over the template text: inserted values
    /// are never rescanned, so a runtime value that happens to contain
    /// another slot's placeholder reaches the model verbatim.
    pub fn format(&self, values: &[(&str, &str)]) -> Result<Vec<PromptMessage>, AgentError> {
        for variable in &self.input_variables {
            if !values.iter().any(|(name, _)| name == variable) {
                return Err(AgentError::Configuration(format!(
                    "no value supplied for input variable '{variable}'"
                )));
            }
        }

        Ok(self
            .messages
            .iter()
            .map(|message| PromptMessage {
                role: message.role,
                content: self.fill(&message.content, values),
            })
            .collect())
    }

    /// One left-to-right substitution pass over a single message body.
    fn fill(&self, template: &str, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(close) = tail.find('}') {
                let name = &tail[1..close];
                if self.input_variables.iter().any(|v| v == name) {
                    if let Some((_, value)) = values.iter().find(|(n, _)| *n == name) {
                        out.push_str(value);
                        rest = &tail[close + 1..];
                        continue;
                    }
                }
            }
            // Not a declared slot; keep the brace literally.
            out.push('{');
            rest = &tail[1..];
        }
        out.push_str(rest);
        out
    }

    /// The runtime substitution slots this template expects.
    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }
}
