use std::collections::BTreeSet;

use crate::types::{ArgSpec, SPEC_KEYS};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Expected a single JSON object at top level")]
    NotAnObject,

    #[error("Spec keys mismatch: missing [{}], unexpected [{}]", .missing.join(", "), .unexpected.join(", "))]
    Keys {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Invalid field type: {0}")]
    Field(#[source] serde_json::Error),
}

/// Parse spec JSON, checking the key set exactly before decoding any field.
pub fn parse_spec(json: &str) -> Result<ArgSpec, ParseError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(ParseError::Json)?;
    let object = value.as_object().ok_or(ParseError::NotAnObject)?;

    let present: BTreeSet<&str> = object.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = SPEC_KEYS.iter().copied().collect();
    if present != expected {
        return Err(ParseError::Keys {
            missing: SPEC_KEYS
                .iter()
                .filter(|k| !present.contains(*k))
                .map(|k| k.to_string())
                .collect(),
            unexpected: present
                .difference(&expected)
                .map(|k| k.to_string())
                .collect(),
        });
    }

    serde_json::from_value(value).map_err(ParseError::Field)
}
