//! The `LanguageModelEndpoint` trait — the loop's polymorphic model boundary.
//!
//! The main implementation is `HttpEndpoint` (any OpenAI-compatible API);
//! tests substitute scripted endpoints.

use async_trait::async_trait;

use loopkit_core::errors::EndpointError;
use loopkit_core::types::{Message, StepResult, ToolDefinition};

/// Per-call request configuration.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// An external language-model service the loop queries each step.
///
/// The only suspension point the loop has besides tool executors. Failures
/// are surfaced as [`EndpointError`] — the loop does not retry.
#[async_trait]
pub trait LanguageModelEndpoint: Send + Sync {
    /// Send the full ordered message history plus the tool registry
    /// description; await text and/or requested tool calls.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        config: &RequestConfig,
    ) -> Result<StepResult, EndpointError>;

    /// The model this endpoint instance sends requests for.
    fn model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
