//! Argument validation — structural checks of model-supplied arguments
//! against a tool's declared parameter schema.
//!
//! Covers the object-schema subset tools declare via
//! [`Tool::parameters`](super::base::Tool::parameters): required
//! properties must be present, and any supplied property that the schema
//! declares must match its `"type"`. Properties the schema does not
//! declare are permitted.

use serde_json::Value;
use std::collections::HashMap;

/// Parse a model-supplied raw argument string into a parameter map.
///
/// The model sends arguments as a JSON-encoded object string; anything
/// else is invalid.
pub fn parse_arguments(raw: &str) -> Result<HashMap<String, Value>, String> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str::<HashMap<String, Value>>(raw)
        .map_err(|e| format!("arguments are not a JSON object: {e}"))
}

/// Validate a parameter map against an object schema.
///
/// Returns a human-readable reason on the first violation found.
pub fn validate_arguments(schema: &Value, args: &HashMap<String, Value>) -> Result<(), String> {
    let properties = schema
        .get("properties")
        .and_then(|p| p.as_object())
        .cloned()
        .unwrap_or_default();

    // Every required property must be present.
    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for name in required.iter().filter_map(|n| n.as_str()) {
            if !args.contains_key(name) {
                return Err(format!("missing required property '{name}'"));
            }
        }
    }

    // Every supplied, declared property must match its declared type.
    for (name, value) in args {
        let Some(declared) = properties.get(name) else {
            continue;
        };
        let Some(expected) = declared.get("type").and_then(|t| t.as_str()) else {
            continue;
        };
        if !type_matches(expected, value) {
            return Err(format!(
                "property '{name}' expected {expected}, got {}",
                json_type_name(value)
            ));
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        // Whole JSON numbers only; 1.5 is not an integer.
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown declared types are not enforced.
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": { "type": "string" },
                "days": { "type": "integer" }
            },
            "required": ["city"]
        })
    }

    fn args(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_valid_arguments() {
        let a = args(&[("city", json!("Berlin")), ("days", json!(3))]);
        assert!(validate_arguments(&weather_schema(), &a).is_ok());
    }

    #[test]
    fn test_missing_required_property() {
        let a = args(&[("days", json!(3))]);
        let err = validate_arguments(&weather_schema(), &a).unwrap_err();
        assert!(err.contains("city"));
    }

    #[test]
    fn test_wrong_type() {
        let a = args(&[("city", json!(42))]);
        let err = validate_arguments(&weather_schema(), &a).unwrap_err();
        assert!(err.contains("expected string"));
        assert!(err.contains("got number"));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let a = args(&[("city", json!("Berlin")), ("days", json!(1.5))]);
        assert!(validate_arguments(&weather_schema(), &a).is_err());
    }

    #[test]
    fn test_undeclared_properties_permitted() {
        let a = args(&[("city", json!("Berlin")), ("units", json!("metric"))]);
        assert!(validate_arguments(&weather_schema(), &a).is_ok());
    }

    #[test]
    fn test_optional_property_may_be_absent() {
        let a = args(&[("city", json!("Berlin"))]);
        assert!(validate_arguments(&weather_schema(), &a).is_ok());
    }

    #[test]
    fn test_number_accepts_integer_value() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "number" } },
            "required": ["a"]
        });
        let a = args(&[("a", json!(2))]);
        assert!(validate_arguments(&schema, &a).is_ok());
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        let schema = json!({"type": "object", "properties": {}, "required": []});
        let a = args(&[("whatever", json!(true))]);
        assert!(validate_arguments(&schema, &a).is_ok());
    }

    #[test]
    fn test_parse_arguments_object() {
        let parsed = parse_arguments(r#"{"city": "Berlin"}"#).unwrap();
        assert_eq!(parsed.get("city").unwrap(), "Berlin");
    }

    #[test]
    fn test_parse_arguments_empty_string() {
        assert!(parse_arguments("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_arguments_not_an_object() {
        assert!(parse_arguments("[1, 2]").is_err());
        assert!(parse_arguments("not json").is_err());
    }
}
