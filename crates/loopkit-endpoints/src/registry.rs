//! Provider presets — static connection defaults for the supported
//! OpenAI-compatible backends.
//!
//! Kept deliberately small: a name, a default API base, and whether the
//! provider is locally hosted (needs no API key). The `local` preset is
//! what makes swapping a hosted model for a vLLM/Ollama-served one a pure
//! config change.

use loopkit_core::config::{ProviderConfig, ProvidersConfig};

/// Static preset describing one endpoint provider.
#[derive(Clone, Debug)]
pub struct ProviderPreset {
    /// Internal name, matching the config section (e.g. `"openrouter"`).
    pub name: &'static str,
    /// Human-readable name for logs.
    pub display_name: &'static str,
    /// Default API base URL.
    pub default_api_base: &'static str,
    /// Locally hosted provider — no API key required.
    pub is_local: bool,
}

/// Supported provider presets, in matching priority order.
pub static PRESETS: &[ProviderPreset] = &[
    ProviderPreset {
        name: "openai",
        display_name: "OpenAI",
        default_api_base: "https://api.openai.com/v1",
        is_local: false,
    },
    ProviderPreset {
        name: "openrouter",
        display_name: "OpenRouter",
        default_api_base: "https://openrouter.ai/api/v1",
        is_local: false,
    },
    ProviderPreset {
        name: "deepseek",
        display_name: "DeepSeek",
        default_api_base: "https://api.deepseek.com/v1",
        is_local: false,
    },
    ProviderPreset {
        name: "groq",
        display_name: "Groq",
        default_api_base: "https://api.groq.com/openai/v1",
        is_local: false,
    },
    ProviderPreset {
        name: "local",
        display_name: "Local",
        default_api_base: "http://localhost:8000/v1",
        is_local: true,
    },
];

/// Find a preset by name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderPreset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Pick the first usable `(preset, config)` pair from the user's provider
/// configuration.
///
/// Hosted providers qualify when an API key is set; the `local` preset
/// qualifies when an API base is set (keys are meaningless there).
pub fn match_provider(
    providers: &ProvidersConfig,
) -> Option<(&'static ProviderPreset, &ProviderConfig)> {
    for preset in PRESETS {
        let Some(config) = providers.get(preset.name) else {
            continue;
        };
        let usable = if preset.is_local {
            config.api_base.is_some()
        } else {
            config.is_configured()
        };
        if usable {
            return Some((preset, config));
        }
    }
    None
}
