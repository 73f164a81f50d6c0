//! The bounded tool-calling loop.
//!
//! Given a prompt, a tool registry, and a step ceiling, the runner calls
//! the language-model endpoint, executes whatever tools the model
//! requests, feeds the results back, and stops when the model answers
//! without tool calls, the budget runs out, or the caller cancels. The
//! endpoint call and the tool executors are the only suspension points;
//! everything in between is synchronous local work.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use loopkit_core::errors::RunError;
use loopkit_core::session::Session;
use loopkit_core::types::Message;
use loopkit_endpoints::traits::{LanguageModelEndpoint, RequestConfig};

use crate::tools::schema::{parse_arguments, validate_arguments};
use crate::tools::{Tool, ToolRegistry};

/// Default maximum endpoint calls per run.
const DEFAULT_MAX_STEPS: usize = 10;

// ─────────────────────────────────────────────
// Config & report
// ─────────────────────────────────────────────

/// Configuration for one runner.
#[derive(Clone, Debug)]
pub struct LoopConfig {
    /// Hard ceiling on endpoint calls per run. Values below 1 are
    /// treated as 1.
    pub max_steps: usize,
    /// Abort the run when a tool executor fails, instead of feeding the
    /// failure back to the model as a tool result.
    pub strict_tool_errors: bool,
    /// Optional system prompt prepended to the session.
    pub system_prompt: Option<String>,
    /// Per-call request settings (max tokens, temperature).
    pub request: RequestConfig,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            strict_tool_errors: false,
            system_prompt: None,
            request: RequestConfig::default(),
        }
    }
}

/// How a run ended. Exactly one of these is reported per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The model produced a terminal answer.
    Done,
    /// The step ceiling was reached before a terminal answer.
    BudgetExhausted,
    /// The caller cancelled; no further endpoint call was issued.
    Cancelled,
}

/// Outcome of one run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub status: RunStatus,
    /// The final answer for `Done`; the last assistant text produced
    /// (possibly empty) otherwise.
    pub text: String,
    /// Endpoint calls made.
    pub steps_taken: usize,
    /// The full conversation, in order.
    pub transcript: Vec<Message>,
}

/// A tool call that passed lookup and argument validation, ready to run.
struct PreparedCall {
    id: String,
    name: String,
    tool: Arc<dyn Tool>,
    args: HashMap<String, Value>,
}

// ─────────────────────────────────────────────
// LoopRunner
// ─────────────────────────────────────────────

/// Runs bounded tool-calling sessions against one endpoint and one
/// registry.
///
/// The runner holds no per-run state; each [`run`](Self::run) creates a
/// fresh [`Session`] and drops it when the run ends, so one runner may
/// serve many sessions in parallel.
pub struct LoopRunner {
    endpoint: Arc<dyn LanguageModelEndpoint>,
    tools: ToolRegistry,
    config: LoopConfig,
}

impl LoopRunner {
    /// Create a new runner.
    pub fn new(
        endpoint: Arc<dyn LanguageModelEndpoint>,
        tools: ToolRegistry,
        config: LoopConfig,
    ) -> Self {
        info!(
            model = endpoint.model(),
            tools = tools.len(),
            max_steps = config.max_steps,
            "loop runner initialized"
        );
        Self {
            endpoint,
            tools,
            config,
        }
    }

    /// Run one session to a terminal outcome.
    pub async fn run(&self, prompt: &str) -> Result<RunReport, RunError> {
        self.run_with_cancellation(prompt, CancellationToken::new())
            .await
    }

    /// Run one session, observing `cancel` at every suspension point:
    /// before each endpoint call and before starting the tools of a
    /// step. In-flight tool executions run to completion; their results
    /// are dropped with the session.
    pub async fn run_with_cancellation(
        &self,
        prompt: &str,
        cancel: CancellationToken,
    ) -> Result<RunReport, RunError> {
        if prompt.trim().is_empty() {
            return Err(RunError::EmptyPrompt);
        }

        let mut session = match &self.config.system_prompt {
            Some(sp) => Session::with_system_prompt(sp.clone()),
            None => Session::new(),
        };
        session.push_user(prompt);

        let definitions = self.tools.definitions();
        let max_steps = self.config.max_steps.max(1);
        let mut last_text = String::new();

        while session.steps_taken() < max_steps {
            if cancel.is_cancelled() {
                return Ok(Self::report(RunStatus::Cancelled, last_text, session));
            }

            let step_number = session.steps_taken() + 1;
            debug!(step = step_number, "endpoint call");

            let step = self
                .endpoint
                .complete(session.transcript(), &definitions, &self.config.request)
                .await
                .map_err(|source| RunError::Endpoint {
                    step: step_number,
                    source,
                })?;
            session.record_step();

            if step.is_final() {
                let text = step.text.unwrap_or_default();
                session.push_assistant(text.clone());
                return Ok(Self::report(RunStatus::Done, text, session));
            }

            last_text = step.text.clone().unwrap_or_default();
            let calls = step.tool_calls;
            session.push_tool_calls(step.text, calls.clone());

            // Resolve and validate every call of the step before running
            // any: an unknown name or bad arguments must mean zero
            // executions for the whole step.
            let mut prepared = Vec::with_capacity(calls.len());
            for call in &calls {
                let name = call.function.name.clone();
                let tool = self.tools.get(&name).ok_or_else(|| RunError::UnknownTool {
                    step: step_number,
                    tool: name.clone(),
                })?;

                let args = parse_arguments(&call.function.arguments).map_err(|reason| {
                    RunError::InvalidArguments {
                        step: step_number,
                        tool: name.clone(),
                        reason,
                    }
                })?;
                validate_arguments(&tool.parameters(), &args).map_err(|reason| {
                    RunError::InvalidArguments {
                        step: step_number,
                        tool: name.clone(),
                        reason,
                    }
                })?;

                prepared.push(PreparedCall {
                    id: call.id.clone(),
                    name,
                    tool,
                    args,
                });
            }

            if cancel.is_cancelled() {
                return Ok(Self::report(RunStatus::Cancelled, last_text, session));
            }

            // The calls of one step are independent; run them
            // concurrently and wait for all of them. `join_all`
            // preserves input order, so results are appended in the
            // order the model requested the calls, each tagged with its
            // call id.
            let executions = prepared.into_iter().map(|call| async move {
                info!(tool = %call.name, "executing tool call");
                let outcome = call.tool.execute(call.args).await;
                (call.id, call.name, outcome)
            });

            for (call_id, name, outcome) in join_all(executions).await {
                match outcome {
                    Ok(result) => {
                        debug!(tool = %name, result_len = result.len(), "tool result");
                        session.push_tool_result(call_id, result);
                    }
                    Err(e) if self.config.strict_tool_errors => {
                        return Err(RunError::ToolExecution {
                            step: step_number,
                            tool: name,
                            message: e.to_string(),
                        });
                    }
                    Err(e) => {
                        // Fed back to the model so it can react.
                        warn!(tool = %name, error = %e, "tool execution failed");
                        session.push_tool_result(call_id, format!("Error executing {name}: {e}"));
                    }
                }
            }
        }

        Ok(Self::report(RunStatus::BudgetExhausted, last_text, session))
    }

    /// Get a reference to the tool registry (for testing/extension).
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn report(status: RunStatus, text: String, session: Session) -> RunReport {
        RunReport {
            status,
            text,
            steps_taken: session.steps_taken(),
            transcript: session.into_transcript(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
