//! Core agent loop implementation.
//!
//! One run walks `Start -> Prompting -> AwaitingModel -> Parsing ->
//! {Acting, Done, Failed}`: render the scratchpad, fill the prompt
//! template, call the model with the stop sequences, decode the reply, and
//! either dispatch a tool and extend the scratchpad or terminate with the
//! final answer. Catalog validation and template compilation happen once at
//! construction, before any model call.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{AgentConfig, ParseErrorPolicy};
use crate::errors::AgentError;
use crate::llm::LlmClient;
use crate::tools::ToolCatalog;

use super::parser::{AgentAction, OutputParser};
use super::prompt::PromptTemplate;
use super::scratchpad::{render_scratchpad, AgentStep, ToolInvocation};

/// Final output when the iteration cap is reached without a final answer.
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit.";

/// Pseudo tool name recorded when a malformed reply is fed back for
/// correction under [`ParseErrorPolicy::RetryWithFeedback`].
const EXCEPTION_TOOL: &str = "_Exception";

/// Why a run terminated in `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The model produced a `Final Answer:`.
    FinalAnswer,
    /// The iteration cap was reached.
    IterationLimit,
}

/// Result of one completed run: the final answer plus the step history.
#[derive(Debug)]
pub struct AgentOutcome {
    pub output: String,
    pub steps: Vec<AgentStep>,
    pub finish: FinishReason,
}

/// The decision loop controller.
///
/// Immutable once constructed; safe to share across tasks. Each `run` owns
/// its scratchpad, so independent runs may execute concurrently against
/// the same `Agent`.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolCatalog,
    template: PromptTemplate,
    parser: OutputParser,
    config: AgentConfig,
}

impl Agent {
    /// Create an agent over a model capability and a tool catalog.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Configuration` when the catalog contains a
    /// multi-input tool. The fixed action grammar extracts exactly one
    /// input string, so such catalogs can never dispatch correctly.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolCatalog,
        config: AgentConfig,
    ) -> Result<Self, AgentError> {
        tools.validate_single_input()?;
        let template = PromptTemplate::build(&tools, &config);

        Ok(Self {
            llm,
            tools,
            template,
            parser: OutputParser::new(),
            config,
        })
    }

    /// Run a task to completion.
    pub async fn run(&self, input: &str) -> Result<AgentOutcome, AgentError> {
        self.run_with_cancel(input, CancellationToken::new()).await
    }

    /// Run a task, aborting with `AgentError::Cancelled` if `cancel` fires
    /// while the model or a tool is in flight. A step is appended to the
    /// scratchpad only after both action and observation are known, so
    /// cancellation never leaves a half-recorded iteration behind.
    pub async fn run_with_cancel(
        &self,
        input: &str,
        cancel: CancellationToken,
    ) -> Result<AgentOutcome, AgentError> {
        let mut steps: Vec<AgentStep> = Vec::new();
        let mut parse_retried = false;

        info!(max_iterations = self.config.max_iterations, "starting agent run");

        for iteration in 0..self.config.max_iterations {
            debug!("agent iteration {}", iteration + 1);

            // Prompting: fill the compiled template with the task input and
            // the current scratchpad render.
            let scratchpad = render_scratchpad(&steps);
            let messages = self
                .template
                .format(&[("input", input), ("agent_scratchpad", &scratchpad)])?;

            // AwaitingModel: the sole model-side suspension point.
            let raw = tokio::select! {
                _ = cancel.cancelled() => return Err(AgentError::Cancelled),
                result = self.llm.generate(&messages, &self.config.stop) => {
                    result.map_err(AgentError::Llm)?
                }
            };

            // Parsing.
            let action = match self.parser.parse(&raw) {
                Ok(action) => {
                    parse_retried = false;
                    action
                }
                Err(err) => match self.config.parse_error_policy {
                    ParseErrorPolicy::Fail => return Err(err),
                    ParseErrorPolicy::SurfaceRawOutput => {
                        warn!("unparseable model output, surfacing raw text as final answer");
                        return Ok(AgentOutcome {
                            output: raw.trim().to_string(),
                            steps,
                            finish: FinishReason::FinalAnswer,
                        });
                    }
                    ParseErrorPolicy::RetryWithFeedback => {
                        if parse_retried {
                            return Err(err);
                        }
                        parse_retried = true;
                        warn!("unparseable model output, feeding correction back");
                        steps.push(AgentStep {
                            action: ToolInvocation::new(EXCEPTION_TOOL, raw.trim()),
                            observation: format!("Invalid Format: {err}"),
                        });
                        continue;
                    }
                },
            };

            // Acting.
            match action {
                AgentAction::Finish { output } => {
                    info!(iterations = iteration + 1, "agent finished");
                    return Ok(AgentOutcome {
                        output,
                        steps,
                        finish: FinishReason::FinalAnswer,
                    });
                }
                AgentAction::Invoke(invocation) => {
                    let observation = self.observe(&invocation, &cancel).await?;
                    debug!(tool = %invocation.tool, "recorded observation");
                    steps.push(AgentStep {
                        action: invocation,
                        observation,
                    });
                }
            }
        }

        info!("agent stopped at iteration limit");
        Ok(AgentOutcome {
            output: ITERATION_LIMIT_MESSAGE.to_string(),
            steps,
            finish: FinishReason::IterationLimit,
        })
    }

    /// Dispatch one tool invocation and produce its observation.
    ///
    /// Unknown tools and tool failures become observations describing the
    /// error, never run-fatal errors, so the model can adapt on the next
    /// turn. Only cancellation propagates.
    async fn observe(
        &self,
        invocation: &ToolInvocation,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        let Some(tool) = self.tools.get(&invocation.tool) else {
            let err = AgentError::ToolNotFound {
                tool: invocation.tool.clone(),
                available: self.tools.render_names(),
            };
            warn!(tool = %invocation.tool, "model requested unknown tool");
            return Ok(err.to_string());
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(AgentError::Cancelled),
            result = tool.invoke(&invocation.input) => result,
        };

        Ok(match result {
            Ok(output) => output,
            Err(source) => {
                warn!(tool = %invocation.tool, error = %source, "tool execution failed");
                AgentError::ToolExecution {
                    tool: invocation.tool.clone(),
                    source,
                }
                .to_string()
            }
        })
    }
}
