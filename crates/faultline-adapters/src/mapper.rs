//! Database mapper validation failures

use faultline_core::{FieldDetail, FieldMap, ValidationError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AdapterError;

/// Name the mapper gives its validation failures
const MAPPER_ERROR_NAME: &str = "ValidationError";

/// Per-field mapper errors keyed by field path, in reporting order
pub type MapperErrors = IndexMap<String, MapperFieldError>;

/// Validation failure as produced by the database mapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct MapperValidation {
    pub message: String,
    pub errors: MapperErrors,
}

/// One field's complaint inside a [`MapperValidation`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperFieldError {
    /// Validator kind, e.g. `required`, `enum`, `minlength`
    pub kind: String,
    pub message: String,
}

impl MapperValidation {
    /// Recognize the mapper's failure shape in an arbitrary value
    ///
    /// Matches an object with a string `message` and an `errors` object of
    /// `{kind, message}` records. A `name` member, when present, must be the
    /// mapper's validation error name.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if !object.get("errors").is_some_and(Value::is_object) {
            return None;
        }

        if let Some(name) = object.get("name")
            && name.as_str() != Some(MAPPER_ERROR_NAME)
        {
            return None;
        }

        Self::deserialize(value).ok()
    }

    /// Decode from a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a mapper validation failure
    pub fn from_json(raw: &str) -> Result<Self, AdapterError> {
        serde_json::from_str(raw).map_err(|e| AdapterError::malformed("mapper validation", e))
    }
}

/// Convert a mapper validation failure into a [`ValidationError`]
///
/// Emits one field per mapper error, names taken verbatim, and keeps the
/// mapper's top-level message.
pub fn from_mapper_validation(failure: &MapperValidation) -> ValidationError {
    let fields = failure
        .errors
        .iter()
        .map(|(field, error)| {
            (
                field.clone(),
                FieldDetail::new(error.kind.as_str(), error.message.as_str()),
            )
        })
        .collect::<FieldMap>();

    tracing::debug!(fields = fields.len(), "converted mapper validation failure");

    ValidationError::with_message(failure.message.as_str(), fields)
}

#[cfg(test)]
mod tests {
    use faultline_core::{FieldIssue, TypedError};
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_each_field_verbatim() {
        let failure = MapperValidation::from_value(&json!({
            "message": "m",
            "errors": { "x": { "kind": "string", "message": "bad" } }
        }))
        .unwrap();

        let error = from_mapper_validation(&failure);

        assert_eq!(error.message(), "m");
        assert_eq!(error.field("x"), Some(&FieldDetail::new(FieldIssue::Other("string".to_owned()), "bad")));
        assert_eq!(
            error.data().unwrap(),
            json!({ "fields": { "x": { "type": "string", "message": "bad" } } })
        );
    }

    #[test]
    fn empty_message_is_derived_from_fields() {
        let failure = MapperValidation::from_json(
            r#"{ "message": "", "errors": { "name": { "kind": "required", "message": "Path `name` is required." } } }"#,
        )
        .unwrap();

        let error = from_mapper_validation(&failure);

        assert_eq!(
            error.message(),
            "Validation error\n  - name: Path `name` is required. (required)"
        );
    }

    #[test]
    fn keeps_reporting_order_and_dotted_paths() {
        let failure = MapperValidation::from_json(
            r#"{
                "message": "User validation failed",
                "errors": {
                    "profile.age": { "kind": "min", "message": "too young" },
                    "email": { "kind": "required", "message": "missing" }
                }
            }"#,
        )
        .unwrap();

        let error = from_mapper_validation(&failure);
        let names: Vec<_> = error.fields().unwrap().keys().cloned().collect();

        assert_eq!(names, ["profile.age", "email"]);
    }

    #[test]
    fn recognizes_only_the_mapper_shape() {
        assert!(MapperValidation::from_value(&json!("ValidationError")).is_none());
        assert!(MapperValidation::from_value(&json!({ "message": "m" })).is_none());
        assert!(MapperValidation::from_value(&json!({ "message": "m", "errors": [] })).is_none());
        assert!(
            MapperValidation::from_value(&json!({ "name": "CastError", "message": "m", "errors": {} })).is_none()
        );
        assert!(
            MapperValidation::from_value(&json!({ "name": "ValidationError", "message": "m", "errors": {} }))
                .is_some()
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = MapperValidation::from_json(r#"{ "errors": {} }"#).unwrap_err();
        assert!(err.to_string().starts_with("malformed mapper validation payload"));
    }
}
