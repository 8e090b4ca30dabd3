//! Schema helpers
//!
//! Utilities for building the JSON Schemas tools advertise and for a basic
//! check of incoming arguments against them.

use serde_json::{Value, json};

/// Create a JSON Schema object type
///
/// # Example
///
/// ```
/// use desk_tools::schema::{object, string, number};
/// use serde_json::json;
///
/// let schema = object(
///     json!({
///         "ticker": string(Some("Stock ticker symbol")),
///         "price": number(Some("Current stock price")),
///     }),
///     vec!["ticker"],
/// );
/// assert_eq!(schema["required"][0], "ticker");
/// ```
pub fn object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Create a JSON Schema string type
pub fn string(description: Option<&str>) -> Value {
    if let Some(d) = description {
        json!({
            "type": "string",
            "description": d,
        })
    } else {
        json!({"type": "string"})
    }
}

/// Create a JSON Schema number type
pub fn number(description: Option<&str>) -> Value {
    if let Some(d) = description {
        json!({
            "type": "number",
            "description": d,
        })
    } else {
        json!({"type": "number"})
    }
}

/// Attach a default value to a property schema
pub fn with_default(mut schema: Value, default: Value) -> Value {
    if let Some(map) = schema.as_object_mut() {
        map.insert("default".to_string(), default);
    }
    schema
}

/// Validate that a value matches a JSON schema's type (basic validation)
pub fn validate_basic(value: &Value, schema: &Value) -> bool {
    let schema_type = match schema.get("type") {
        Some(Value::String(t)) => t.as_str(),
        _ => return true, // No type constraint, accept anything
    };

    match schema_type {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true, // Unknown type, accept
    }
}

/// Check tool arguments against an object schema
///
/// Verifies the top-level type, that every required property is present and
/// that present properties have the declared basic type. Returns the name of
/// the offending field and a reason on failure.
pub fn validate_arguments(args: &Value, schema: &Value) -> Result<(), (String, String)> {
    if !validate_basic(args, schema) {
        return Err(("arguments".to_string(), "expected a JSON object".to_string()));
    }

    let Some(fields) = args.as_object() else {
        return Ok(());
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if fields.get(name).is_none_or(Value::is_null) {
                return Err((name.to_string(), "is required".to_string()));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, value) in fields.iter().filter(|(_, v)| !v.is_null()) {
            let Some(property) = properties.get(name) else {
                continue;
            };
            if !validate_basic(value, property) {
                let expected = property
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("a different type");
                return Err((name.clone(), format!("expected {expected}")));
            }
        }
    }

    Ok(())
}
