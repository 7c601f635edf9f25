//! Response Parser — locates the structured payload in the model's raw text
//! and validates it against the evaluation schema.
//!
//! The model is instructed to return bare JSON, but in practice it may wrap
//! the object in markdown fences or surround it with commentary. The parser
//! strips fences, scans for the first brace-balanced `{…}` object, and then
//! checks every field declared in `schema::EVALUATION_FIELDS` for presence
//! and type before decoding. Fields the model volunteers beyond the schema are
//! ignored. Any violation is fatal to the run.

use serde_json::Value;
use thiserror::Error;

use crate::schema::{EvaluationResult, FieldKind, EVALUATION_FIELDS};

#[derive(Debug, Error)]
pub enum ResponseParseError {
    #[error("response contains no JSON object payload")]
    PayloadNotFound,

    #[error("payload is not well-formed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` has the wrong type (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Extracts and validates an `EvaluationResult` from raw response text.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult, ResponseParseError> {
    let payload = locate_payload(raw).ok_or(ResponseParseError::PayloadNotFound)?;
    let value: Value = serde_json::from_str(payload)?;
    let object = value.as_object().ok_or(ResponseParseError::NotAnObject)?;

    for spec in EVALUATION_FIELDS {
        let field = object
            .get(spec.key)
            .ok_or(ResponseParseError::MissingField { field: spec.key })?;
        match spec.kind {
            FieldKind::Score if !field.is_number() => {
                return Err(ResponseParseError::WrongType {
                    field: spec.key,
                    expected: "number",
                })
            }
            FieldKind::Narrative if !field.is_string() => {
                return Err(ResponseParseError::WrongType {
                    field: spec.key,
                    expected: "string",
                })
            }
            _ => {}
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Finds the structured payload within surrounding text: strips code fences,
/// then takes the first brace-balanced object. Braces inside string literals
/// do not count toward the balance, so commentary after the object (stray
/// `}` included) is left behind.
fn locate_payload(text: &str) -> Option<&str> {
    let text = strip_fences(text);
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    // Never balanced: hand the tail to the JSON parser so the error
    // names the actual malformation.
    Some(&text[start..])
}

/// Strips a surrounding ```json … ``` or ``` … ``` fence, if present.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    for tag in ["```json", "```"] {
        if let Some(inner) = trimmed.strip_prefix(tag) {
            let inner = inner.trim_start();
            return inner.strip_suffix("```").map(str::trim).unwrap_or(inner);
        }
    }
    trimmed
}
