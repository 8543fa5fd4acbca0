use std::sync::Arc;

use serde_json::Value;

use crate::error::{ErrorKind, TypedError};

/// Last-resort wrapper for input that fits no other leaf
///
/// Has no stable code. Keeps a best-effort message, the original value as
/// `data` when it was a JSON value, and the original error when it was one.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct FallbackError {
    message: String,
    data: Option<Value>,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    trivial: bool,
}

impl FallbackError {
    pub fn new(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            message: message.into(),
            data,
            source: None,
            trivial: ErrorKind::Fallback.default_trivial(),
        }
    }

    /// Wrap an arbitrary value, deriving a message from it
    ///
    /// Strings are used as-is, other scalars by their JSON form. Structured
    /// values contribute their `message` member when it is a string.
    pub fn from_value(value: Value) -> Self {
        let message = match &value {
            Value::String(s) => s.clone(),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(ErrorKind::Fallback.default_message())
                .to_owned(),
            Value::Array(_) => ErrorKind::Fallback.default_message().to_owned(),
        };

        Self::new(message, Some(value))
    }

    /// Wrap an arbitrary error, keeping it as the source
    pub fn from_error(error: Arc<dyn std::error::Error + Send + Sync>) -> Self {
        Self {
            message: error.to_string(),
            data: None,
            source: Some(error),
            trivial: ErrorKind::Fallback.default_trivial(),
        }
    }

    #[must_use]
    pub fn trivial(mut self, trivial: bool) -> Self {
        self.trivial = trivial;
        self
    }
}

impl TypedError for FallbackError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Fallback
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn data(&self) -> Option<Value> {
        self.data.clone()
    }

    fn is_trivial(&self) -> bool {
        self.trivial
    }
}
