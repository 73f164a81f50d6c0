//! Configuration schema.
//!
//! Hierarchy: `Config` → `LoopDefaults`, `ProvidersConfig`, `ToolsConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.loopkit/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub defaults: LoopDefaults,
    pub providers: ProvidersConfig,
    pub tools: ToolsConfig,
}

// ─────────────────────────────────────────────
// Loop defaults
// ─────────────────────────────────────────────

/// Default settings for a run of the loop.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoopDefaults {
    /// Model identifier sent to the endpoint.
    pub model: String,
    /// Hard ceiling on endpoint calls per run.
    pub max_steps: u32,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Abort the run when a tool executor fails, instead of feeding the
    /// failure back to the model as a tool result.
    pub strict_tool_errors: bool,
    /// Optional system prompt prepended to every session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for LoopDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_steps: 10,
            max_tokens: 4096,
            temperature: 0.7,
            strict_tool_errors: false,
            system_prompt: None,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Configuration for a single endpoint provider (API key, base URL).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for bearer authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Extra headers to send with each request (e.g. proxy app codes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<HashMap<String, String>>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// All provider configurations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub openrouter: ProviderConfig,
    #[serde(default)]
    pub deepseek: ProviderConfig,
    #[serde(default)]
    pub groq: ProviderConfig,
    /// A locally served OpenAI-compatible model (vLLM, Ollama, …).
    /// Needs no API key; `apiBase` points at the local server.
    #[serde(default)]
    pub local: ProviderConfig,
}

impl ProvidersConfig {
    /// Iterate `(name, config)` pairs in matching priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ProviderConfig)> {
        [
            ("openai", &self.openai),
            ("openrouter", &self.openrouter),
            ("deepseek", &self.deepseek),
            ("groq", &self.groq),
            ("local", &self.local),
        ]
        .into_iter()
    }

    /// Look up a provider config by name.
    pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
        self.iter().find(|(n, _)| *n == name).map(|(_, c)| c)
    }
}

// ─────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────

/// Built-in tool configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolsConfig {
    pub weather: WeatherConfig,
}

/// Weather tool settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherConfig {
    /// Override the weather API base URL (used by tests and proxies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.model, "gpt-4o");
        assert_eq!(config.defaults.max_steps, 10);
        assert!(!config.defaults.strict_tool_errors);
        assert!(config.defaults.system_prompt.is_none());
    }

    #[test]
    fn test_provider_is_configured() {
        let mut provider = ProviderConfig::default();
        assert!(!provider.is_configured());
        provider.api_key = "sk-test".into();
        assert!(provider.is_configured());
    }

    #[test]
    fn test_camel_case_keys() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["defaults"].get("maxSteps").is_some());
        assert!(json["defaults"].get("max_steps").is_none());
        assert!(json["defaults"].get("strictToolErrors").is_some());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"defaults": {"model": "deepseek-chat", "maxSteps": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.defaults.model, "deepseek-chat");
        assert_eq!(config.defaults.max_steps, 3);
        // untouched fields keep defaults
        assert_eq!(config.defaults.max_tokens, 4096);
        assert_eq!(config.defaults.temperature, 0.7);
    }

    #[test]
    fn test_extra_headers_parsed() {
        let config: Config = serde_json::from_str(
            r#"{"providers": {"openrouter": {
                "apiKey": "sk-or-1",
                "extraHeaders": {"X-Title": "Loopkit"}
            }}}"#,
        )
        .unwrap();
        let headers = config.providers.openrouter.extra_headers.unwrap();
        assert_eq!(headers.get("X-Title").unwrap(), "Loopkit");
    }

    #[test]
    fn test_providers_lookup() {
        let mut config = Config::default();
        config.providers.openrouter.api_key = "sk-or-abc".into();
        assert!(config.providers.get("openrouter").unwrap().is_configured());
        assert!(!config.providers.get("openai").unwrap().is_configured());
        assert!(config.providers.get("missing").is_none());
    }
}
