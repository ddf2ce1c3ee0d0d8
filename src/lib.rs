//! # chat-agent
//!
//! A ReAct-style chat agent decision loop over free-text model output.
//!
//! This library provides:
//! - A prompt assembler that renders tools, format instructions, and the
//!   run's scratchpad into role-tagged messages
//! - An output parser that decodes model text into tool invocations or a
//!   final answer
//! - The loop controller that ties both to external model and tool
//!   capabilities
//!
//! ## Architecture
//!
//! The agent follows the render/call/parse/record cycle:
//! 1. Build the prompt from the tool catalog, format instructions, and the
//!    rendered history of prior (action, observation) pairs
//! 2. Call the model with `Observation:` as a stop sequence
//! 3. Parse the reply; either dispatch the named tool and record its
//!    observation, or terminate with the final answer
//!
//! Model clients and tool implementations stay behind the [`LlmClient`] and
//! [`Tool`] traits; this crate owns only the text protocol between them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chat_agent::{Agent, AgentConfig, ToolCatalog};
//!
//! let tools = ToolCatalog::new(vec![Arc::new(MySearchTool)]);
//! let agent = Agent::new(Arc::new(MyLlmClient::new()), tools, AgentConfig::default())?;
//! let outcome = agent.run("What is the weather in Paris?").await?;
//! println!("{}", outcome.output);
//! ```

pub mod agent;
pub mod config;
pub mod errors;
pub mod llm;
pub mod tools;

pub use agent::{Agent, AgentOutcome, FinishReason};
pub use config::{AgentConfig, ParseErrorPolicy};
pub use errors::AgentError;
pub use llm::{LlmClient, ScriptedLlm};
pub use tools::{Tool, ToolCatalog};
