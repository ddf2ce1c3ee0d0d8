//! Crate-wide error taxonomy.
//!
//! Construction-time problems (`Configuration`) abort before any model call.
//! `ToolNotFound` and `ToolExecution` are recoverable: the agent loop records
//! them as observations so the model can self-correct on the next turn.
//! `Parse` is recoverable by policy (see [`ParseErrorPolicy`]), `Cancelled`
//! is fatal to the in-flight run only.
//!
//! [`ParseErrorPolicy`]: crate::config::ParseErrorPolicy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Bad catalog, template, or config detected at construction.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model output matched neither the action grammar nor the final-answer
    /// prefix. `raw` carries the full model text for diagnostics.
    #[error("Could not parse model output: {message}")]
    Parse { message: String, raw: String },

    /// The model named a tool that is not in the catalog.
    #[error("{tool} is not a valid tool, try one of [{available}].")]
    ToolNotFound { tool: String, available: String },

    /// A tool ran and failed. The Display form doubles as the observation
    /// the loop records.
    #[error("Error: tool '{tool}' failed: {source}")]
    ToolExecution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    /// The model capability itself failed.
    #[error("Model call failed: {0}")]
    Llm(#[source] anyhow::Error),

    /// The run was cancelled while awaiting the model or a tool.
    #[error("Run cancelled")]
    Cancelled,
}

impl AgentError {
    /// Shorthand for a parse failure over some raw model text.
    pub(crate) fn parse(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            raw: raw.into(),
        }
    }
}
