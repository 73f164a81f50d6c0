//! Error taxonomy for the bounded loop.
//!
//! Failures abort the run and carry the step number at which they occurred,
//! plus the offending tool name where one exists. Budget exhaustion and
//! cancellation are *not* errors — they are terminal statuses on the run
//! report, so callers can always tell "answered" from "ran out of budget"
//! from "broke".

use thiserror::Error;

/// A language-model endpoint call failed.
///
/// The loop treats these as non-retriable and surfaces them immediately;
/// a retry means a fresh session.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into a step result.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A run failure. Steps are 1-based.
#[derive(Debug, Error)]
pub enum RunError {
    /// The initial prompt was empty or whitespace.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// The endpoint call for `step` failed.
    #[error("endpoint call failed at step {step}: {source}")]
    Endpoint {
        step: usize,
        #[source]
        source: EndpointError,
    },

    /// The model requested a tool that is not in the registry.
    /// No tool of that step was executed.
    #[error("model requested unknown tool '{tool}' at step {step}")]
    UnknownTool { step: usize, tool: String },

    /// Model-supplied arguments failed schema validation, before the
    /// executor was invoked.
    #[error("invalid arguments for tool '{tool}' at step {step}: {reason}")]
    InvalidArguments {
        step: usize,
        tool: String,
        reason: String,
    },

    /// A tool executor failed while strict mode was configured. With
    /// strict mode off, executor failures are fed back to the model as
    /// tool results instead.
    #[error("tool '{tool}' failed at step {step}: {message}")]
    ToolExecution {
        step: usize,
        tool: String,
        message: String,
    },
}

impl RunError {
    /// The 1-based step at which the run failed (0 for precondition
    /// violations that happen before any endpoint call).
    pub fn step(&self) -> usize {
        match self {
            RunError::EmptyPrompt => 0,
            RunError::Endpoint { step, .. }
            | RunError::UnknownTool { step, .. }
            | RunError::InvalidArguments { step, .. }
            | RunError::ToolExecution { step, .. } => *step,
        }
    }
}
