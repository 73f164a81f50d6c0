//! Generic HTTP endpoint for OpenAI-compatible `/chat/completions` APIs.
//!
//! Covers every preset in the [`registry`](crate::registry) — hosted
//! providers and locally served models alike speak the same wire format.
//! Transport failures, non-2xx statuses, and undecodable bodies map onto
//! the three [`EndpointError`] variants; the loop surfaces them without
//! retrying.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, error, warn};

use loopkit_core::errors::EndpointError;
use loopkit_core::types::{
    ChatCompletionRequest, ChatCompletionResponse, Message, StepResult, ToolDefinition,
};

use crate::registry::{match_provider, ProviderPreset};
use crate::traits::{LanguageModelEndpoint, RequestConfig};

/// HTTP request timeout. Generous because tool-heavy completions are slow.
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ─────────────────────────────────────────────
// HttpEndpoint
// ─────────────────────────────────────────────

/// A language-model endpoint that talks to any OpenAI-compatible HTTP API.
pub struct HttpEndpoint {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication. Empty for local providers.
    api_key: String,
    /// Model identifier sent with each request.
    model: String,
    /// Display name for logging.
    display_name: String,
    /// Extra headers sent with each request (e.g. proxy app codes).
    extra_headers: HeaderMap,
}

impl std::fmt::Debug for HttpEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEndpoint")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("provider", &self.display_name)
            .finish()
    }
}

impl HttpEndpoint {
    /// Create a new endpoint.
    ///
    /// `api_key` may be empty, in which case no Authorization header is
    /// sent (locally served models).
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        HttpEndpoint {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            display_name: display_name.into(),
            extra_headers: HeaderMap::new(),
        }
    }

    /// Attach extra headers sent with every request. Invalid header
    /// names or values are skipped with a warning.
    pub fn with_extra_headers(mut self, headers: &HashMap<String, String>) -> Self {
        for (key, value) in headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(val)) => {
                    self.extra_headers.insert(name, val);
                }
                _ => warn!("Invalid header: {}={}", key, value),
            }
        }
        self
    }

    /// Build an endpoint from a preset plus user config.
    pub fn from_preset(
        preset: &ProviderPreset,
        config: &loopkit_core::config::ProviderConfig,
        model: &str,
    ) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| preset.default_api_base.to_string());
        let endpoint = Self::new(api_base, config.api_key.clone(), model, preset.display_name);
        match &config.extra_headers {
            Some(headers) => endpoint.with_extra_headers(headers),
            None => endpoint,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl LanguageModelEndpoint for HttpEndpoint {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        config: &RequestConfig,
    ) -> Result<StepResult, EndpointError> {
        debug!(
            provider = %self.display_name,
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "calling endpoint"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        let mut request = self
            .client
            .post(self.completions_url())
            .headers(self.extra_headers.clone())
            .json(&request_body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = %self.display_name, error = %e, "HTTP request failed");
            EndpointError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(provider = %self.display_name, status = %status, body = %body, "API error");
            return Err(EndpointError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat_resp: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(provider = %self.display_name, error = %e, "failed to parse response");
            EndpointError::Malformed(e.to_string())
        })?;

        let step = chat_resp
            .into_step_result()
            .ok_or_else(|| EndpointError::Malformed("no choices in response".to_string()))?;

        debug!(
            provider = %self.display_name,
            has_text = step.text.is_some(),
            tool_calls = step.tool_calls.len(),
            finish_reason = step.finish_reason.as_deref().unwrap_or("?"),
            "endpoint response received"
        );

        Ok(step)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

// ─────────────────────────────────────────────
// Builder (convenience)
// ─────────────────────────────────────────────

/// Build an [`HttpEndpoint`] from the user's provider configuration.
///
/// Picks the first configured provider in preset priority order.
pub fn create_endpoint(
    model: &str,
    providers: &loopkit_core::config::ProvidersConfig,
) -> Result<HttpEndpoint, String> {
    let (preset, config) = match_provider(providers).ok_or_else(|| {
        format!(
            "No configured provider found for model '{model}'. \
             Set an API key (e.g. LOOPKIT_PROVIDERS__OPENAI__API_KEY) or \
             point the 'local' provider at an OpenAI-compatible server."
        )
    })?;

    debug!(
        provider = preset.display_name,
        model = model,
        api_base = config.api_base.as_deref().unwrap_or(preset.default_api_base),
        "creating endpoint"
    );

    Ok(HttpEndpoint::from_preset(preset, config, model))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
