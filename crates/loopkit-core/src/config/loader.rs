//! Config loader — reads `~/.loopkit/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.loopkit/config.json`
//! 3. Environment variables `LOOPKIT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `LOOPKIT_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `LOOPKIT_DEFAULTS__MODEL` → `defaults.model`
/// - `LOOPKIT_DEFAULTS__MAX_STEPS` → `defaults.max_steps`
/// - `LOOPKIT_DEFAULTS__MAX_TOKENS` → `defaults.max_tokens`
/// - `LOOPKIT_DEFAULTS__TEMPERATURE` → `defaults.temperature`
/// - `LOOPKIT_DEFAULTS__STRICT_TOOL_ERRORS` → `defaults.strict_tool_errors`
/// - `LOOPKIT_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `LOOPKIT_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("LOOPKIT_DEFAULTS__MODEL") {
        config.defaults.model = val;
    }
    if let Ok(val) = std::env::var("LOOPKIT_DEFAULTS__MAX_STEPS") {
        if let Ok(n) = val.parse::<u32>() {
            config.defaults.max_steps = n;
        }
    }
    if let Ok(val) = std::env::var("LOOPKIT_DEFAULTS__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.defaults.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("LOOPKIT_DEFAULTS__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.defaults.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("LOOPKIT_DEFAULTS__STRICT_TOOL_ERRORS") {
        config.defaults.strict_tool_errors = val == "true" || val == "1";
    }

    apply_provider_env(&mut config.providers.openai, "OPENAI");
    apply_provider_env(&mut config.providers.openrouter, "OPENROUTER");
    apply_provider_env(&mut config.providers.deepseek, "DEEPSEEK");
    apply_provider_env(&mut config.providers.groq, "GROQ");
    apply_provider_env(&mut config.providers.local, "LOCAL");

    config
}

fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("LOOPKIT_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("LOOPKIT_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.defaults.max_steps, 10);
        assert_eq!(config.defaults.model, "gpt-4o");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "defaults": {
                "model": "deepseek-chat",
                "maxSteps": 5
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.model, "deepseek-chat");
        assert_eq!(config.defaults.max_steps, 5);
        // Default preserved
        assert_eq!(config.defaults.temperature, 0.7);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.max_steps, 10);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.defaults.model = "llama-3.3-70b".to_string();
        config.providers.groq.api_key = "gsk-test".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.defaults.model, "llama-3.3-70b");
        assert_eq!(reloaded.providers.groq.api_key, "gsk-test");
    }

    #[test]
    fn test_env_override_model() {
        std::env::set_var("LOOPKIT_DEFAULTS__MODEL", "test-model");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.defaults.model, "test-model");
        std::env::remove_var("LOOPKIT_DEFAULTS__MODEL");
    }

    #[test]
    fn test_env_override_provider_key() {
        std::env::set_var("LOOPKIT_PROVIDERS__OPENROUTER__API_KEY", "sk-or-env");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.openrouter.api_key, "sk-or-env");
        std::env::remove_var("LOOPKIT_PROVIDERS__OPENROUTER__API_KEY");
    }

    #[test]
    fn test_env_override_strict_mode() {
        std::env::set_var("LOOPKIT_DEFAULTS__STRICT_TOOL_ERRORS", "1");
        let config = apply_env_overrides(Config::default());
        assert!(config.defaults.strict_tool_errors);
        std::env::remove_var("LOOPKIT_DEFAULTS__STRICT_TOOL_ERRORS");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["defaults"].get("maxSteps").is_some());
        assert!(raw["defaults"].get("max_steps").is_none());
    }

    #[test]
    fn test_full_config_with_providers() {
        let file = write_temp_json(
            r#"{
            "providers": {
                "openrouter": { "apiKey": "sk-or-456", "apiBase": "https://custom.io/v1" },
                "local": { "apiBase": "http://localhost:8000/v1" }
            },
            "defaults": {
                "model": "meta-llama/llama-3.3-70b",
                "strictToolErrors": true
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert!(config.providers.openrouter.is_configured());
        assert_eq!(
            config.providers.openrouter.api_base.as_deref(),
            Some("https://custom.io/v1")
        );
        assert_eq!(
            config.providers.local.api_base.as_deref(),
            Some("http://localhost:8000/v1")
        );
        assert!(config.defaults.strict_tool_errors);
        assert!(!config.providers.openai.is_configured());
    }
}
