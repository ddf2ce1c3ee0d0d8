//! Agent module - the core decision loop logic.
//!
//! The agent follows a render/call/parse/record cycle:
//! 1. Render the scratchpad and fill the compiled prompt template
//! 2. Call the model with the fixed stop sequences
//! 3. Decode the reply into a tool invocation or a final answer
//! 4. Dispatch the tool, record the observation, repeat until the model
//!    finishes or the iteration cap is reached

mod agent_loop;
pub mod parser;
pub mod prompt;
pub mod scratchpad;

pub use agent_loop::{Agent, AgentOutcome, FinishReason, ITERATION_LIMIT_MESSAGE};
