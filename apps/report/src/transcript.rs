//! Transcript Loader — reads the recorded interview JSON into an `InterviewRecord`.
//!
//! The source file must decode into an object with exactly the fields of
//! `InterviewRecord`; anything else fails with a `SchemaValidationError`
//! naming the offending field. Validation runs on the raw JSON value before
//! serde decoding so error messages carry field paths instead of serde's
//! positional messages.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaValidationError {
    #[error("failed to read transcript file: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcript is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transcript root must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` has the wrong type (expected {expected})")]
    WrongType { field: String, expected: &'static str },

    #[error("unexpected field `{field}`")]
    UnknownField { field: String },
}

/// One question/answer pair. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationEntry {
    pub question: String,
    pub answer: String,
}

/// The interview being evaluated. Constructed once at process start,
/// read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewRecord {
    pub email: String,
    pub name: String,
    pub role: String,
    pub date: String,
    pub conversation: Vec<ConversationEntry>,
}

const METADATA_FIELDS: [&str; 4] = ["email", "name", "role", "date"];

impl InterviewRecord {
    /// Parses the transcript file at `path`. No side effects beyond the read.
    pub fn load(path: &Path) -> Result<Self, SchemaValidationError> {
        let raw = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)?;
        validate_shape(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Checks the transcript's shape field by field so failures name the exact
/// offending field, including the index path for conversation entries.
fn validate_shape(value: &Value) -> Result<(), SchemaValidationError> {
    let root = value.as_object().ok_or(SchemaValidationError::NotAnObject)?;

    for field in METADATA_FIELDS {
        match root.get(field) {
            None => return Err(missing(field)),
            Some(Value::String(_)) => {}
            Some(_) => return Err(wrong_type(field, "string")),
        }
    }

    let conversation = root.get("conversation").ok_or_else(|| missing("conversation"))?;
    let entries = conversation
        .as_array()
        .ok_or_else(|| wrong_type("conversation", "array"))?;

    for (i, entry) in entries.iter().enumerate() {
        let entry = entry
            .as_object()
            .ok_or_else(|| wrong_type(&format!("conversation[{i}]"), "object"))?;

        for field in ["question", "answer"] {
            match entry.get(field) {
                None => return Err(missing(&format!("conversation[{i}].{field}"))),
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(wrong_type(&format!("conversation[{i}].{field}"), "string"))
                }
            }
        }

        if let Some(extra) = entry.keys().find(|k| *k != "question" && *k != "answer") {
            return Err(SchemaValidationError::UnknownField {
                field: format!("conversation[{i}].{extra}"),
            });
        }
    }

    if let Some(extra) = root
        .keys()
        .find(|k| !METADATA_FIELDS.contains(&k.as_str()) && *k != "conversation")
    {
        return Err(SchemaValidationError::UnknownField {
            field: extra.clone(),
        });
    }

    Ok(())
}

fn missing(field: &str) -> SchemaValidationError {
    SchemaValidationError::MissingField {
        field: field.to_string(),
    }
}

fn wrong_type(field: &str, expected: &'static str) -> SchemaValidationError {
    SchemaValidationError::WrongType {
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn valid_transcript() -> Value {
        json!({
            "email": "a@x.com",
            "name": "Alice",
            "role": "Engineer",
            "date": "2024-01-01",
            "conversation": [
                {"question": "Tell me about Rust.", "answer": "Ownership and borrowing."},
                {"question": "Describe a hard bug.", "answer": "A race in a file watcher."}
            ]
        })
    }

    #[test]
    fn test_load_preserves_conversation_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", valid_transcript()).unwrap();

        let record = InterviewRecord::load(file.path()).unwrap();
        assert_eq!(record.conversation.len(), 2);
        assert_eq!(record.name, "Alice");
        assert_eq!(record.conversation[0].question, "Tell me about Rust.");
    }

    #[test]
    fn test_missing_conversation_names_field() {
        let mut value = valid_transcript();
        value.as_object_mut().unwrap().remove("conversation");

        let err = validate_shape(&value).unwrap_err();
        match err {
            SchemaValidationError::MissingField { field } => assert_eq!(field, "conversation"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_metadata_field_names_field() {
        let mut value = valid_transcript();
        value.as_object_mut().unwrap().remove("email");

        let err = validate_shape(&value).unwrap_err();
        match err {
            SchemaValidationError::MissingField { field } => assert_eq!(field, "email"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_metadata_is_wrong_type() {
        let mut value = valid_transcript();
        value["date"] = json!(20240101);

        let err = validate_shape(&value).unwrap_err();
        match err {
            SchemaValidationError::WrongType { field, expected } => {
                assert_eq!(field, "date");
                assert_eq!(expected, "string");
            }
            other => panic!("expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn test_entry_missing_answer_names_indexed_field() {
        let mut value = valid_transcript();
        value["conversation"][1]
            .as_object_mut()
            .unwrap()
            .remove("answer");

        let err = validate_shape(&value).unwrap_err();
        match err {
            SchemaValidationError::MissingField { field } => {
                assert_eq!(field, "conversation[1].answer")
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let mut value = valid_transcript();
        value["interviewer"] = json!("Bob");

        let err = validate_shape(&value).unwrap_err();
        match err {
            SchemaValidationError::UnknownField { field } => assert_eq!(field, "interviewer"),
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_conversation_not_array_is_wrong_type() {
        let mut value = valid_transcript();
        value["conversation"] = json!("not a list");

        let err = validate_shape(&value).unwrap_err();
        match err {
            SchemaValidationError::WrongType { field, expected } => {
                assert_eq!(field, "conversation");
                assert_eq!(expected, "array");
            }
            other => panic!("expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = InterviewRecord::load(Path::new("/nonexistent/interview_data.json")).unwrap_err();
        assert!(matches!(err, SchemaValidationError::Io(_)));
    }
}
