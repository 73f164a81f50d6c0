//! Tool trait — the abstract interface every tool must implement.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use loopkit_core::types::ToolDefinition;

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// A named, schema-described callable the model may request to invoke.
///
/// The loop discovers tools via `name()`, sends their schemas to the model
/// via `to_definition()`, validates model-proposed arguments against
/// `parameters()`, and dispatches calls via `execute()`. Executors may
/// perform network I/O and suspend; they are the only suspension points
/// besides the endpoint call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used by the model to call this tool (e.g. `"get_weather"`).
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema describing the parameters (as a `serde_json::Value`).
    ///
    /// Must be `{"type": "object", "properties": {...}, "required": [...]}`.
    /// Model-supplied arguments are validated against it before `execute`
    /// is ever invoked.
    fn parameters(&self) -> Value;

    /// Execute the tool with validated arguments.
    ///
    /// Returns the result as a string (the model reads this). A failure
    /// is recorded as an error tool result unless the loop runs in strict
    /// mode, in which case it aborts the run.
    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String>;

    /// Build the [`ToolDefinition`] sent to the model.
    ///
    /// Default implementation — rarely needs overriding.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.parameters())
    }
}

// ─────────────────────────────────────────────
// Param helpers
// ─────────────────────────────────────────────

/// Extract a required `String` param, returning a user-friendly error.
pub fn require_string(params: &HashMap<String, Value>, key: &str) -> anyhow::Result<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {key}"))
}

/// Extract a required numeric param.
pub fn require_f64(params: &HashMap<String, Value>, key: &str) -> anyhow::Result<f64> {
    params
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| anyhow::anyhow!("Missing required numeric parameter: {key}"))
}

/// Extract an optional `String` param.
pub fn optional_string(params: &HashMap<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_string_present() {
        let mut params = HashMap::new();
        params.insert("city".into(), json!("Berlin"));
        assert_eq!(require_string(&params, "city").unwrap(), "Berlin");
    }

    #[test]
    fn test_require_string_missing() {
        let params = HashMap::new();
        assert!(require_string(&params, "city").is_err());
    }

    #[test]
    fn test_require_string_wrong_type() {
        let mut params = HashMap::new();
        params.insert("city".into(), json!(42));
        assert!(require_string(&params, "city").is_err());
    }

    #[test]
    fn test_require_f64() {
        let mut params = HashMap::new();
        params.insert("a".into(), json!(1.5));
        params.insert("b".into(), json!(2));
        assert_eq!(require_f64(&params, "a").unwrap(), 1.5);
        assert_eq!(require_f64(&params, "b").unwrap(), 2.0);
        assert!(require_f64(&params, "c").is_err());
    }

    #[test]
    fn test_optional_string() {
        let mut params = HashMap::new();
        params.insert("timezone".into(), json!("UTC"));
        assert_eq!(optional_string(&params, "timezone"), Some("UTC".into()));
        assert_eq!(optional_string(&params, "other"), None);
    }

    /// Verify the default `to_definition()` produces the right shape.
    #[test]
    fn test_to_definition_default() {
        struct DummyTool;

        #[async_trait]
        impl Tool for DummyTool {
            fn name(&self) -> &str {
                "dummy"
            }
            fn description(&self) -> &str {
                "A test tool"
            }
            fn parameters(&self) -> Value {
                json!({
                    "type": "object",
                    "properties": {
                        "msg": { "type": "string" }
                    },
                    "required": ["msg"]
                })
            }
            async fn execute(&self, _params: HashMap<String, Value>) -> anyhow::Result<String> {
                Ok("ok".into())
            }
        }

        let def = DummyTool.to_definition();
        assert_eq!(def.function.name, "dummy");
        assert_eq!(def.function.description, "A test tool");
        assert_eq!(def.tool_type, "function");
    }
}
