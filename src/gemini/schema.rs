/// Response schema descriptors
///
/// A `Schema` is sent to Gemini as `generationConfig.responseSchema` so the
/// model produces JSON of a known shape, and the same descriptor is used to
/// validate whatever comes back before it is deserialized into our types.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Declarative description of an expected JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String {
        description: Option<&'static str>,
        /// Allowed values; empty means any string
        allowed: Vec<&'static str>,
    },
    Array {
        items: Box<Schema>,
    },
    Object {
        /// Ordered (name, schema) pairs
        properties: Vec<(&'static str, Schema)>,
        required: Vec<&'static str>,
    },
}

/// A value did not match its schema
#[derive(Debug, Clone, PartialEq, Error)]
#[error("schema violation at {path}: {reason}")]
pub struct SchemaViolation {
    /// JSON path of the offending value, e.g. `$.care.light`
    pub path: String,
    pub reason: String,
}

impl Schema {
    pub fn string() -> Self {
        Schema::String { description: None, allowed: Vec::new() }
    }

    pub fn described(description: &'static str) -> Self {
        Schema::String { description: Some(description), allowed: Vec::new() }
    }

    pub fn one_of(allowed: &[&'static str]) -> Self {
        Schema::String { description: None, allowed: allowed.to_vec() }
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array { items: Box::new(items) }
    }

    /// Object whose properties are all required
    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        let required = properties.iter().map(|(name, _)| *name).collect();
        Schema::Object { properties, required }
    }

    /// Render as a Gemini `responseSchema` value
    pub fn to_json(&self) -> Value {
        match self {
            Schema::String { description, allowed } => {
                let mut out = Map::new();
                out.insert("type".into(), json!("STRING"));
                if let Some(description) = description {
                    out.insert("description".into(), json!(description));
                }
                if !allowed.is_empty() {
                    out.insert("enum".into(), json!(allowed));
                }
                Value::Object(out)
            }
            Schema::Array { items } => json!({
                "type": "ARRAY",
                "items": items.to_json(),
            }),
            Schema::Object { properties, required } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_json()))
                    .collect();
                json!({
                    "type": "OBJECT",
                    "properties": props,
                    "required": required,
                })
            }
        }
    }

    /// Check that `value` has this shape
    ///
    /// Required properties must be present, non-null and, for strings,
    /// non-blank. Unknown properties are ignored.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        match (self, value) {
            (Schema::String { allowed, .. }, Value::String(s)) => {
                if !allowed.is_empty() && !allowed.iter().any(|value| *value == s.as_str()) {
                    return Err(violation(path, format!("{s:?} is not one of {allowed:?}")));
                }
                Ok(())
            }
            (Schema::Array { items }, Value::Array(values)) => {
                for (i, item) in values.iter().enumerate() {
                    items.validate_at(&format!("{path}[{i}]"), item)?;
                }
                Ok(())
            }
            (Schema::Object { properties, required }, Value::Object(fields)) => {
                for (name, schema) in properties {
                    let child = format!("{path}.{name}");
                    let is_required = required.contains(name);
                    match fields.get(*name) {
                        None | Some(Value::Null) if is_required => {
                            return Err(violation(&child, "required field is missing"));
                        }
                        None | Some(Value::Null) => {}
                        Some(Value::String(s)) if is_required && s.trim().is_empty() => {
                            return Err(violation(&child, "required field is empty"));
                        }
                        Some(field) => schema.validate_at(&child, field)?,
                    }
                }
                Ok(())
            }
            (expected, found) => Err(violation(
                path,
                format!("expected {}, found {}", expected.type_name(), json_type(found)),
            )),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Schema::String { .. } => "string",
            Schema::Array { .. } => "array",
            Schema::Object { .. } => "object",
        }
    }
}

fn violation(path: &str, reason: impl Into<String>) -> SchemaViolation {
    SchemaViolation { path: path.to_string(), reason: reason.into() }
}

fn json_type(value: &Value) -> &'static str {
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

    fn care_like() -> Schema {
        Schema::object(vec![
            ("name", Schema::string()),
            ("level", Schema::one_of(&["Easy", "Hard"])),
            ("tags", Schema::array(Schema::string())),
        ])
    }

    #[test]
    fn test_to_json_matches_gemini_shape() {
        let json = care_like().to_json();
        assert_eq!(json["type"], "OBJECT");
        assert_eq!(json["properties"]["level"]["enum"], json!(["Easy", "Hard"]));
        assert_eq!(json["properties"]["tags"]["type"], "ARRAY");
        assert_eq!(json["properties"]["tags"]["items"]["type"], "STRING");
        assert_eq!(json["required"], json!(["name", "level", "tags"]));
    }

    #[test]
    fn test_description_is_emitted_only_when_set() {
        assert_eq!(Schema::described("One sentence").to_json()["description"], "One sentence");
        assert!(Schema::string().to_json().get("description").is_none());
    }

    #[test]
    fn test_accepts_well_formed_value() {
        let value = json!({"name": "绿萝", "level": "Easy", "tags": ["耐阴"], "extra": 1});
        assert_eq!(care_like().validate(&value), Ok(()));
    }

    #[test]
    fn test_rejects_missing_null_and_blank_required_fields() {
        let schema = care_like();

        let missing = json!({"level": "Easy", "tags": []});
        assert_eq!(schema.validate(&missing).unwrap_err().path, "$.name");

        let null = json!({"name": null, "level": "Easy", "tags": []});
        assert_eq!(schema.validate(&null).unwrap_err().path, "$.name");

        let blank = json!({"name": "  ", "level": "Easy", "tags": []});
        assert_eq!(schema.validate(&blank).unwrap_err().reason, "required field is empty");
    }

    #[test]
    fn test_rejects_value_outside_enum() {
        let value = json!({"name": "x", "level": "Medium", "tags": []});
        assert_eq!(care_like().validate(&value).unwrap_err().path, "$.level");
    }

    #[test]
    fn test_reports_nested_array_path() {
        let value = json!({"name": "x", "level": "Easy", "tags": ["ok", 3]});
        let err = care_like().validate(&value).unwrap_err();
        assert_eq!(err.path, "$.tags[1]");
        assert_eq!(err.reason, "expected string, found number");
    }

    #[test]
    fn test_optional_property_may_be_absent() {
        let schema = Schema::Object {
            properties: vec![("name", Schema::string()), ("imageUrl", Schema::string())],
            required: vec!["name"],
        };
        assert!(schema.validate(&json!({"name": "x"})).is_ok());
        assert!(schema.validate(&json!({"name": "x", "imageUrl": 5})).is_err());
    }
}
