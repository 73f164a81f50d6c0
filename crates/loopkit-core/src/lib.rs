//! Loopkit core — shared types for the bounded tool-calling loop.
//!
//! This crate contains:
//! - **types**: chat messages, tool calls/definitions, step results, wire types
//! - **errors**: the run-failure and endpoint-failure taxonomies
//! - **session**: append-only per-run conversation state
//! - **config**: JSON config schema + loader
//! - **utils**: data-dir and path helpers

pub mod config;
pub mod errors;
pub mod session;
pub mod types;
pub mod utils;

pub use errors::{EndpointError, RunError};
pub use session::Session;
pub use types::{Message, StepResult, ToolCall, ToolDefinition};
