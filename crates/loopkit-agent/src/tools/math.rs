//! Pure local tools — arithmetic and clock.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::base::{optional_string, require_f64, Tool};

// ─────────────────────────────────────────────
// AddNumbersTool
// ─────────────────────────────────────────────

/// Adds two numbers. The model uses this to combine tool results
/// (e.g. temperatures from two weather lookups).
pub struct AddNumbersTool;

#[async_trait]
impl Tool for AddNumbersTool {
    fn name(&self) -> &str {
        "add_numbers"
    }

    fn description(&self) -> &str {
        "Add two numbers and return their sum."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": { "type": "number", "description": "First addend" },
                "b": { "type": "number", "description": "Second addend" }
            },
            "required": ["a", "b"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let a = require_f64(&params, "a")?;
        let b = require_f64(&params, "b")?;
        let sum = a + b;
        // Render whole sums without a trailing ".0" so the model reads "5",
        // not "5.0".
        if sum.fract() == 0.0 && sum.abs() < 1e15 {
            Ok(format!("{}", sum as i64))
        } else {
            Ok(format!("{sum}"))
        }
    }
}

// ─────────────────────────────────────────────
// CurrentTimeTool
// ─────────────────────────────────────────────

/// Reports the current time, optionally in a named fixed-offset zone.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time. Pass 'utc' for UTC, omit for local time."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "timezone": {
                    "type": "string",
                    "description": "Either 'utc' or 'local' (default)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let zone = optional_string(&params, "timezone").unwrap_or_else(|| "local".into());
        let formatted = match zone.to_lowercase().as_str() {
            "utc" => chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            _ => chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        };
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn test_add_integers() {
        let result = AddNumbersTool
            .execute(params(&[("a", json!(18)), ("b", json!(24))]))
            .await
            .unwrap();
        assert_eq!(result, "42");
    }

    #[tokio::test]
    async fn test_add_fractions() {
        let result = AddNumbersTool
            .execute(params(&[("a", json!(18.5)), ("b", json!(21.25))]))
            .await
            .unwrap();
        assert_eq!(result, "39.75");
    }

    #[tokio::test]
    async fn test_add_missing_param_fails() {
        let result = AddNumbersTool.execute(params(&[("a", json!(1))])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_current_time_utc() {
        let result = CurrentTimeTool
            .execute(params(&[("timezone", json!("utc"))]))
            .await
            .unwrap();
        assert!(result.ends_with("UTC"));
    }

    #[tokio::test]
    async fn test_current_time_default() {
        let result = CurrentTimeTool.execute(HashMap::new()).await.unwrap();
        // YYYY-MM-DD prefix
        assert_eq!(result.chars().nth(4), Some('-'));
    }

    #[test]
    fn test_definitions() {
        assert_eq!(AddNumbersTool.name(), "add_numbers");
        let def = AddNumbersTool.to_definition();
        assert_eq!(
            def.function.parameters["required"],
            serde_json::json!(["a", "b"])
        );
    }
}
