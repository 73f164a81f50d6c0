//! Tool modules for the Loopkit agent.

pub mod base;
pub mod math;
pub mod registry;
pub mod schema;
pub mod weather;

pub use base::{optional_string, require_f64, require_string, Tool};
pub use registry::ToolRegistry;
