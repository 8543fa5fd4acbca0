use serde_json::{Value, json};

use crate::{
    error::{ErrorKind, TypedError},
    fields::{FieldDetail, FieldMap, summarize, summarize_data},
};

/// Malformed or invalid request input
///
/// Carries a per-field complaint map under `data.fields`. When no message is
/// given, it is derived from the fields with [`summarize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    fields: Option<FieldMap>,
    trivial: bool,
}

impl ValidationError {
    /// Create from a field map, deriving the message
    pub fn new(fields: FieldMap) -> Self {
        Self::build(None, Some(fields))
    }

    /// Create with an explicit message
    ///
    /// An empty message is treated as absent and derived from the fields.
    pub fn with_message(message: impl Into<String>, fields: FieldMap) -> Self {
        Self::build(Some(message.into()), Some(fields))
    }

    /// Create without any field detail
    pub fn bare(message: impl Into<String>) -> Self {
        Self::build(Some(message.into()), None)
    }

    /// Create from an arbitrary `{"fields": {...}}` payload
    ///
    /// Entries that are not `{type, message}` records are dropped from the
    /// stored field map; a payload without a `fields` object carries none.
    pub fn from_data(message: Option<String>, data: &Value) -> Self {
        let fields = data.get("fields").and_then(Value::as_object).map(|entries| {
            entries
                .iter()
                .filter_map(|(field, entry)| {
                    serde_json::from_value::<FieldDetail>(entry.clone())
                        .ok()
                        .map(|detail| (field.clone(), detail))
                })
                .collect::<FieldMap>()
        });

        let message = match message {
            Some(message) if !message.is_empty() => message,
            _ => summarize_data(data),
        };

        Self {
            message,
            fields,
            trivial: ErrorKind::Validation.default_trivial(),
        }
    }

    fn build(message: Option<String>, fields: Option<FieldMap>) -> Self {
        let message = match message {
            Some(message) if !message.is_empty() => message,
            _ => summarize(fields.as_ref()),
        };

        Self {
            message,
            fields,
            trivial: ErrorKind::Validation.default_trivial(),
        }
    }

    /// Mark whether this failure is expected during normal operation
    #[must_use]
    pub fn trivial(mut self, trivial: bool) -> Self {
        self.trivial = trivial;
        self
    }

    pub const fn fields(&self) -> Option<&FieldMap> {
        self.fields.as_ref()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDetail> {
        self.fields.as_ref()?.get(name)
    }
}

impl TypedError for ValidationError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn data(&self) -> Option<Value> {
        self.fields.as_ref().map(|fields| json!({ "fields": fields }))
    }

    fn is_trivial(&self) -> bool {
        self.trivial
    }
}
