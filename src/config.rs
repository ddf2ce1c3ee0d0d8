//! Agent configuration.
//!
//! All template strings, stop sequences, and loop bounds live here as
//! immutable values built once at agent construction; nothing is read from
//! ambient globals during a run. Environment overrides:
//! - `AGENT_MAX_ITERATIONS` - Optional. Loop iteration cap. Defaults to `15`.
//! - `AGENT_USE_SYSTEM_ROLE` - Optional. Whether the target model accepts a
//!   leading system-role message. Defaults to `true`.

use crate::agent::parser::OBSERVATION_STOP;
use crate::agent::prompt::{
    FORMAT_INSTRUCTIONS, HUMAN_MESSAGE, SYSTEM_MESSAGE_PREFIX, SYSTEM_MESSAGE_SUFFIX,
};
use crate::errors::AgentError;

/// What the loop does when model output matches neither grammar pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorPolicy {
    /// Propagate the parse error; the run fails.
    Fail,
    /// Degrade: surface the raw model text as the final answer.
    SurfaceRawOutput,
    /// Feed an "Invalid Format" observation back once so the model can
    /// self-correct; a second consecutive failure propagates.
    RetryWithFeedback,
}

/// Immutable per-agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// System message text ahead of the tool description block.
    pub system_message_prefix: String,

    /// System message text after the format instructions.
    pub system_message_suffix: String,

    /// Human message template holding the runtime substitution slots.
    pub human_message: String,

    /// Format instructions with the `{tool_names}` placeholder.
    pub format_instructions: String,

    /// Names of the runtime substitution slots.
    pub input_variables: Vec<String>,

    /// Stop sequences attached to every model call.
    pub stop: Vec<String>,

    /// Whether the target model accepts a leading system-role message.
    pub use_system_role: bool,

    /// Maximum loop iterations before the run is stopped.
    pub max_iterations: usize,

    /// Recovery policy for unparseable model output.
    pub parse_error_policy: ParseErrorPolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_message_prefix: SYSTEM_MESSAGE_PREFIX.to_string(),
            system_message_suffix: SYSTEM_MESSAGE_SUFFIX.to_string(),
            human_message: HUMAN_MESSAGE.to_string(),
            format_instructions: FORMAT_INSTRUCTIONS.to_string(),
            input_variables: vec!["input".to_string(), "agent_scratchpad".to_string()],
            stop: vec![OBSERVATION_STOP.to_string()],
            use_system_role: true,
            max_iterations: 15,
            parse_error_policy: ParseErrorPolicy::Fail,
        }
    }
}

impl AgentConfig {
    /// Defaults with overrides from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Configuration` when an override has an invalid
    /// value.
    pub fn from_env() -> Result<Self, AgentError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("AGENT_MAX_ITERATIONS") {
            config.max_iterations = value.parse().map_err(|e| {
                AgentError::Configuration(format!("invalid AGENT_MAX_ITERATIONS: {e}"))
            })?;
        }

        if let Ok(value) = std::env::var("AGENT_USE_SYSTEM_ROLE") {
            config.use_system_role = parse_bool(&value)
                .map_err(|e| AgentError::Configuration(format!("invalid AGENT_USE_SYSTEM_ROLE: {e}")))?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}
