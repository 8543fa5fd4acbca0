//! JSON schema validator error lists
//!
//! Each validator error names a keyword, a set of params and the path of the
//! offending value. The subject field is taken from the `missingProperty`
//! param, else the first alphabetic token of the path, else the
//! `additionalProperty` param. Errors are then classified by the first
//! matching rule:
//!
//! 1. `required` keyword or a `missingProperty` param: `required`
//! 2. `additionalProperties` keyword: `unknown`
//! 3. a `type`, `allowedValues` or `format` param, or one of the
//!    `rid`/`oneOf`/`anyOf`/`allOf`/`pattern` keywords: `invalid`
//! 4. one of the length/count keywords: `invalid` with a length message
//!
//! Errors matching no rule contribute nothing.

use std::sync::OnceLock;

use faultline_core::{FieldDetail, FieldIssue, FieldMap, ValidationError};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::AdapterError;

/// Top-level message of schema validation failures
pub const DEFAULT_MESSAGE: &str = "Invalid request data";

/// Key used when no subject field can be derived from an error
pub const UNNAMED_FIELD: &str = "(unknown)";

const COMPOSITE_KEYWORDS: [&str; 5] = ["rid", "oneOf", "anyOf", "allOf", "pattern"];
const LENGTH_KEYWORDS: [&str; 4] = ["maxItems", "minItems", "maxLength", "minLength"];

/// A single schema validator error
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaError {
    #[serde(default)]
    pub keyword: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: Map<String, Value>,
    /// Path of the offending value, e.g. `.name` or `/name`
    #[serde(default, alias = "instancePath")]
    pub data_path: Option<String>,
}

impl SchemaError {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn data_path(mut self, path: impl Into<String>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Subject field of this error
    fn subject(&self) -> Option<String> {
        fn token_re() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new(r"[a-zA-Z]+").expect("must be valid regex"))
        }

        self.truthy_param("missingProperty")
            .or_else(|| {
                self.data_path
                    .as_deref()
                    .and_then(|path| token_re().find(path))
                    .map(|token| token.as_str().to_owned())
            })
            .or_else(|| self.truthy_param("additionalProperty"))
    }

    /// String form of a param that is present and truthy
    fn truthy_param(&self, name: &str) -> Option<String> {
        self.params.get(name).filter(|value| is_truthy(value)).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn has_truthy_param(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(is_truthy)
    }

    /// Classify this error into a field complaint, if any rule applies
    pub fn classify(&self) -> Option<(String, FieldDetail)> {
        let keyword = self.keyword.as_str();
        let name = self.subject().unwrap_or_else(|| UNNAMED_FIELD.to_owned());

        let missing = self.params.get("missingProperty").is_some_and(|value| !value.is_null());

        let detail = if keyword == "required" || missing {
            FieldDetail::new(FieldIssue::Required, format!("{name} is required"))
        } else if keyword == "additionalProperties" {
            FieldDetail::new(FieldIssue::Unknown, format!("{name} is not a known field"))
        } else if self.has_truthy_param("type")
            || self.has_truthy_param("allowedValues")
            || self.has_truthy_param("format")
            || COMPOSITE_KEYWORDS.contains(&keyword)
        {
            FieldDetail::new(FieldIssue::Invalid, format!("{name} is invalid"))
        } else if LENGTH_KEYWORDS.contains(&keyword) {
            FieldDetail::new(FieldIssue::Invalid, format!("{name} length is invalid"))
        } else {
            return None;
        };

        Some((name, detail))
    }
}

/// One schema error or a list of them
#[serde_with::serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SchemaErrors(#[serde_as(deserialize_as = "serde_with::OneOrMany<_>")] pub Vec<SchemaError>);

impl SchemaErrors {
    /// Decode from a JSON document holding one error or an array of them
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a schema error or error list
    pub fn from_json(raw: &str) -> Result<Self, AdapterError> {
        serde_json::from_str(raw).map_err(|e| AdapterError::malformed("schema error", e))
    }

    /// Decode from an already parsed value
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a schema error or error list
    pub fn from_value(value: Value) -> Result<Self, AdapterError> {
        serde_json::from_value(value).map_err(|e| AdapterError::malformed("schema error", e))
    }
}

impl From<SchemaError> for SchemaErrors {
    fn from(error: SchemaError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Converts schema validator errors with a configurable top-level message
#[derive(Debug, Clone)]
pub struct SchemaAdapter {
    message: String,
}

impl Default for SchemaAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE)
    }
}

impl SchemaAdapter {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert a sequence of schema errors into one [`ValidationError`]
    ///
    /// Fields are keyed by subject name; a later error for the same name
    /// replaces the earlier one.
    pub fn convert(&self, errors: impl IntoIterator<Item = SchemaError>) -> ValidationError {
        let mut fields = FieldMap::new();

        for error in errors {
            match error.classify() {
                Some((name, detail)) => {
                    fields.insert(name, detail);
                }
                None => {
                    tracing::debug!(keyword = %error.keyword, "schema error matched no rule, dropping");
                }
            }
        }

        ValidationError::with_message(self.message.as_str(), fields)
    }
}

/// Convert schema errors using the default top-level message
pub fn from_schema_errors(errors: impl IntoIterator<Item = SchemaError>) -> ValidationError {
    SchemaAdapter::default().convert(errors)
}

/// Truthiness as the validator's host language sees it
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use faultline_core::TypedError;
    use serde_json::json;

    use super::*;

    fn field(error: &ValidationError, name: &str) -> (String, String) {
        let detail = error.field(name).unwrap();
        (detail.kind.to_string(), detail.message.clone())
    }

    #[test]
    fn required_keyword() {
        let error = from_schema_errors([SchemaError::new("required").param("missingProperty", "email")]);

        assert_eq!(error.message(), "Invalid request data");
        assert_eq!(field(&error, "email"), ("required".to_owned(), "email is required".to_owned()));
    }

    #[test]
    fn length_keyword_uses_path_token() {
        let error = from_schema_errors([SchemaError::new("maxLength").data_path(".name")]);
        assert_eq!(field(&error, "name"), ("invalid".to_owned(), "name length is invalid".to_owned()));
    }

    #[test]
    fn path_token_is_first_alphabetic_run() {
        let error = from_schema_errors([SchemaError::new("pattern").data_path("/items/0/sku")]);
        assert_eq!(field(&error, "items"), ("invalid".to_owned(), "items is invalid".to_owned()));
    }

    #[test]
    fn missing_property_param_wins_without_required_keyword() {
        let error = from_schema_errors([SchemaError::new("dependencies").param("missingProperty", "zip")]);
        assert_eq!(field(&error, "zip"), ("required".to_owned(), "zip is required".to_owned()));
    }

    #[test]
    fn additional_property_is_unknown() {
        let error =
            from_schema_errors([SchemaError::new("additionalProperties").param("additionalProperty", "nickname")]);
        assert_eq!(
            field(&error, "nickname"),
            ("unknown".to_owned(), "nickname is not a known field".to_owned())
        );
    }

    #[test]
    fn path_token_takes_precedence_over_additional_property() {
        let error = from_schema_errors([SchemaError::new("additionalProperties")
            .data_path(".address")
            .param("additionalProperty", "planet")]);

        assert_eq!(
            field(&error, "address"),
            ("unknown".to_owned(), "address is not a known field".to_owned())
        );
    }

    #[test]
    fn constraint_params_are_invalid() {
        for (param, value) in [
            ("type", json!("string")),
            ("allowedValues", json!(["a", "b"])),
            ("format", json!("email")),
        ] {
            let error = from_schema_errors([SchemaError::new("whatever").data_path(".kind").param(param, value)]);
            assert_eq!(field(&error, "kind"), ("invalid".to_owned(), "kind is invalid".to_owned()), "{param}");
        }
    }

    #[test]
    fn falsy_constraint_params_do_not_match() {
        let error = from_schema_errors([SchemaError::new("whatever").data_path(".kind").param("type", "")]);
        assert!(error.fields().unwrap().is_empty());
    }

    #[test]
    fn unrecognized_keyword_is_dropped() {
        let error = from_schema_errors([
            SchemaError::new("multipleOf").data_path(".count"),
            SchemaError::new("required").param("missingProperty", "email"),
        ]);

        let fields = error.fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields.get("count").is_none());
    }

    #[test]
    fn same_name_last_write_wins() {
        let error = from_schema_errors([
            SchemaError::new("required").param("missingProperty", "name"),
            SchemaError::new("minLength").data_path(".name"),
        ]);

        assert_eq!(error.fields().unwrap().len(), 1);
        assert_eq!(field(&error, "name"), ("invalid".to_owned(), "name length is invalid".to_owned()));
    }

    #[test]
    fn unnamed_errors_use_placeholder_key() {
        let error = from_schema_errors([SchemaError::new("required")]);
        assert_eq!(
            field(&error, UNNAMED_FIELD),
            ("required".to_owned(), "(unknown) is required".to_owned())
        );
    }

    #[test]
    fn single_error_document() {
        let errors =
            SchemaErrors::from_json(r#"{ "keyword": "format", "params": { "format": "email" }, "dataPath": ".email" }"#)
                .unwrap();
        assert_eq!(errors.0.len(), 1);

        let error = from_schema_errors(errors);
        assert_eq!(field(&error, "email"), ("invalid".to_owned(), "email is invalid".to_owned()));
    }

    #[test]
    fn error_list_with_instance_path_and_null_params() {
        let errors = SchemaErrors::from_value(json!([
            { "keyword": "minItems", "params": null, "instancePath": "/tags" },
            { "keyword": "required", "params": { "missingProperty": "title" } }
        ]))
        .unwrap();

        let error = SchemaAdapter::new("Bad payload").convert(errors);

        assert_eq!(error.message(), "Bad payload");
        let names: Vec<_> = error.fields().unwrap().keys().cloned().collect();
        assert_eq!(names, ["tags", "title"]);
    }

    #[test]
    fn rejects_non_error_documents() {
        assert!(SchemaErrors::from_json("42").is_err());
    }
}
