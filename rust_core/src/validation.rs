//! Structural validation of homework status payloads
//!
//! The review API answers with a JSON object carrying a `homeworks` array and
//! an optional `current_date` cursor. `validate` walks that object read-only
//! and turns it into typed [`HomeworkRecord`]s, naming the offending field
//! when the shape is wrong.

use crate::models::HomeworkRecord;
use serde_json::Value;
use thiserror::Error;

pub const HOMEWORKS_FIELD: &str = "homeworks";
pub const NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";
pub const CURRENT_DATE_FIELD: &str = "current_date";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unexpected response shape at `{field}`: {reason}")]
    ShapeMismatch { field: String, reason: &'static str },
}

impl ValidationError {
    fn shape(field: impl Into<String>, reason: &'static str) -> Self {
        ValidationError::ShapeMismatch {
            field: field.into(),
            reason,
        }
    }

    #[cfg(test)]
    fn field(&self) -> &str {
        match self {
            ValidationError::ShapeMismatch { field, .. } => field,
        }
    }
}

/// Validate a decoded API payload and extract its homework records.
///
/// Every record must carry a non-blank `homework_name` and `status`. Whether
/// the status is a known one is left to formatting. An empty `homeworks`
/// array is valid: it means nothing changed.
pub fn validate(payload: &Value) -> Result<Vec<HomeworkRecord>, ValidationError> {
    let root = payload
        .as_object()
        .ok_or_else(|| ValidationError::shape("<root>", "expected a JSON object"))?;

    let homeworks = root
        .get(HOMEWORKS_FIELD)
        .ok_or_else(|| ValidationError::shape(HOMEWORKS_FIELD, "field is missing"))?
        .as_array()
        .ok_or_else(|| ValidationError::shape(HOMEWORKS_FIELD, "expected an array"))?;

    homeworks
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_record(idx, item))
        .collect()
}

fn parse_record(idx: usize, item: &Value) -> Result<HomeworkRecord, ValidationError> {
    let path = format!("{HOMEWORKS_FIELD}[{idx}]");
    let obj = item
        .as_object()
        .ok_or_else(|| ValidationError::shape(path.clone(), "expected a JSON object"))?;

    let name = string_field(obj, &path, NAME_FIELD)?;
    let status = string_field(obj, &path, STATUS_FIELD)?;

    Ok(HomeworkRecord::new(name, status))
}

fn string_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a str, ValidationError> {
    match obj.get(key) {
        None => Err(ValidationError::shape(format!("{path}.{key}"), "field is missing")),
        Some(v) => match v.as_str() {
            None => Err(ValidationError::shape(format!("{path}.{key}"), "expected a string")),
            Some(s) if s.trim().is_empty() => {
                Err(ValidationError::shape(format!("{path}.{key}"), "must not be empty"))
            }
            Some(s) => Ok(s),
        },
    }
}

/// Server-side timestamp to use as the next `from_date`, if the payload has one.
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get(CURRENT_DATE_FIELD).and_then(Value::as_i64)
}
