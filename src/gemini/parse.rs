/// Response parsing
///
/// Raw model text is parsed as JSON, checked against the schema that was
/// sent with the request, and only then deserialized. Any failure rejects
/// the whole payload.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::schema::{Schema, SchemaViolation};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

/// Parse `raw` into `T`, requiring it to satisfy `schema`
pub fn parse<T: DeserializeOwned>(raw: &str, schema: &Schema) -> Result<T, ParseError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    schema.validate(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Remove a surrounding ```json fence if the model added one
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
