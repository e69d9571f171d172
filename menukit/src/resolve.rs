//! Field resolution and validation
//!
//! Every surface funnels its raw input through [`resolve_fields`], so the same
//! value is accepted or rejected with the same message whether it arrived as a
//! command-line flag, an HTTP body or an MCP call.

use crate::error::{MalformedInput, ValidationError};
use crate::field::Field;
use crate::formats;
use indexmap::IndexMap;
use serde_json::Value;

/// Length limit applied to fields without an explicit one
pub const DEFAULT_CHAR_LIMIT: usize = 10_000;

/// Flat JSON object as received from a surface
pub type JsonObject = serde_json::Map<String, Value>;

/// Resolved field values keyed by field key, in declaration order
pub type FieldMap = IndexMap<String, String>;

/// Validate and collect the declared fields from `input`
///
/// Fields are processed in declaration order and the first failure is
/// returned. Non-string values count as absent. Optional fields that are
/// absent are left out of the result rather than defaulted.
///
/// ```
/// use menukit::{resolve_fields, Field, JsonObject, ValidationError};
/// use serde_json::json;
///
/// let fields = [Field::new().key("domain").format("domain")];
///
/// let empty = JsonObject::new();
/// assert_eq!(
///     resolve_fields(&fields, &empty),
///     Err(ValidationError::MissingRequiredField { key: "domain".into() })
/// );
///
/// let input = json!({"domain": "example.com"});
/// let resolved = resolve_fields(&fields, input.as_object().unwrap()).unwrap();
/// assert_eq!(resolved["domain"], "example.com");
/// ```
pub fn resolve_fields(fields: &[Field], input: &JsonObject) -> Result<FieldMap, ValidationError> {
    let mut resolved = FieldMap::with_capacity(fields.len());

    for field in fields {
        let key = field.resolved_key();
        match input.get(&key).and_then(Value::as_str) {
            Some(value) => {
                validate_value(field, value)?;
                resolved.insert(key, value.to_string());
            }
            None if field.required => {
                return Err(ValidationError::MissingRequiredField { key });
            }
            None => {}
        }
    }

    Ok(resolved)
}

/// Length, format and custom checks for a single value
///
/// Required-ness is not checked here; the interactive prompt uses this to
/// validate each answer as it is typed.
pub fn validate_value(field: &Field, value: &str) -> Result<(), ValidationError> {
    let limit = field.effective_limit();
    if value.chars().count() > limit {
        return Err(ValidationError::FieldTooLong {
            key: field.resolved_key(),
            limit,
        });
    }

    if let Some(tag) = field.format.as_deref() {
        formats::validate_format(tag, value).map_err(|e| ValidationError::InvalidFormat {
            key: field.resolved_key(),
            reason: e.to_string(),
        })?;
    }

    if let Some(validate) = field.custom_validator() {
        validate(value).map_err(|reason| ValidationError::InvalidValue {
            key: field.resolved_key(),
            reason,
        })?;
    }

    Ok(())
}

/// Parse a raw payload into a flat JSON object
///
/// An empty payload is treated as an empty object.
pub fn parse_arguments(raw: &[u8]) -> Result<JsonObject, MalformedInput> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }

    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(MalformedInput::new(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(MalformedInput::new(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_required_field_enforced() {
        let fields = [Field::new().key("domain")];
        assert_eq!(
            resolve_fields(&fields, &JsonObject::new()),
            Err(ValidationError::MissingRequiredField {
                key: "domain".into()
            })
        );
        let resolved = resolve_fields(&fields, &object(json!({"domain": "example.com"}))).unwrap();
        assert_eq!(resolved.get("domain").map(String::as_str), Some("example.com"));
    }

    #[test]
    fn test_optional_field_absent_from_output() {
        let fields = [Field::new().key("ticker").required(false)];
        let resolved = resolve_fields(&fields, &JsonObject::new()).unwrap();
        assert!(!resolved.contains_key("ticker"));
    }

    #[test]
    fn test_non_string_counts_as_absent() {
        let fields = [
            Field::new().key("count"),
            Field::new().key("note").required(false),
        ];
        let err = resolve_fields(&fields, &object(json!({"count": 3}))).unwrap_err();
        assert_eq!(err.key(), "count");

        let resolved =
            resolve_fields(&fields, &object(json!({"count": "3", "note": null}))).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_key_derived_from_title() {
        let fields = [Field::new().title("Task title")];
        let resolved = resolve_fields(&fields, &object(json!({"task_title": "Ship"}))).unwrap();
        assert_eq!(resolved["task_title"], "Ship");
    }

    #[test]
    fn test_length_limit() {
        let fields = [Field::new().key("code").char_limit(10)];
        assert!(resolve_fields(&fields, &object(json!({"code": "a".repeat(10)}))).is_ok());
        assert_eq!(
            resolve_fields(&fields, &object(json!({"code": "a".repeat(11)}))),
            Err(ValidationError::FieldTooLong {
                key: "code".into(),
                limit: 10
            })
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let fields = [Field::new().key("name").char_limit(4)];
        assert!(resolve_fields(&fields, &object(json!({"name": "ññññ"}))).is_ok());
    }

    #[test]
    fn test_default_limit() {
        let fields = [Field::new().key("body")];
        let at_limit = "x".repeat(DEFAULT_CHAR_LIMIT);
        let over = "x".repeat(DEFAULT_CHAR_LIMIT + 1);
        assert!(resolve_fields(&fields, &object(json!({"body": at_limit}))).is_ok());
        let err = resolve_fields(&fields, &object(json!({"body": over}))).unwrap_err();
        assert_eq!(err.to_string(), "body exceeds maximum length of 10000");
    }

    #[test]
    fn test_format_then_custom() {
        let fields = [Field::new()
            .key("domain")
            .format("domain")
            .validate(|v: &str| {
                if v.ends_with(".com") {
                    Ok(())
                } else {
                    Err("only .com domains")
                }
            })];

        let err = resolve_fields(&fields, &object(json!({"domain": "localhost"}))).unwrap_err();
        assert_eq!(err.to_string(), "invalid domain: invalid domain format");

        let err = resolve_fields(&fields, &object(json!({"domain": "example.org"}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
        assert_eq!(err.to_string(), "invalid domain: only .com domains");
    }

    #[test]
    fn test_stops_at_first_failure() {
        let fields = [Field::new().key("first"), Field::new().key("second")];
        let err = resolve_fields(&fields, &JsonObject::new()).unwrap_err();
        assert_eq!(err.key(), "first");
    }

    #[test]
    fn test_preserves_declaration_order() {
        let fields = [Field::new().key("b"), Field::new().key("a")];
        let resolved = resolve_fields(&fields, &object(json!({"a": "1", "b": "2"}))).unwrap();
        let keys: Vec<_> = resolved.keys().cloned().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_parse_arguments() {
        assert!(parse_arguments(b"").unwrap().is_empty());
        assert_eq!(parse_arguments(br#"{"a":"b"}"#).unwrap()["a"], "b");
        assert!(parse_arguments(b"{").is_err());
        let err = parse_arguments(b"[1,2]").unwrap_err();
        assert_eq!(err.to_string(), "invalid arguments");
        assert!(err.detail().contains("array"));
    }
}
