//! Loopkit agent — the bounded tool-calling loop and its tools.
//!
//! This crate contains:
//! - **tools**: Tool trait, registry, argument validation, and the
//!   built-in demo tools (weather, math)
//! - **run_loop**: the model ↔ tool loop with a hard step ceiling,
//!   explicit terminal outcomes, and cancellation

pub mod run_loop;
pub mod tools;

pub use run_loop::{LoopConfig, LoopRunner, RunReport, RunStatus};
pub use tools::{Tool, ToolRegistry};
