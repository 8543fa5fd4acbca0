use faultline_core::{RuntimeFault, RuntimeFaultKind};
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;

/// One fault of every runtime kind
pub fn all_runtime_faults() -> Vec<RuntimeFault> {
    RuntimeFaultKind::iter()
        .map(|kind| RuntimeFault::new(kind, format!("{kind} raised")).with_stack(format!("{kind}\n    at handler")))
        .collect()
}

/// Builder for mapper validation failure documents
#[derive(Default)]
pub struct MapperFailure {
    message: String,
    errors: Map<String, Value>,
}

impl MapperFailure {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            errors: Map::new(),
        }
    }

    pub fn error(mut self, field: &str, kind: &str, message: &str) -> Self {
        self.errors
            .insert(field.to_owned(), json!({ "kind": kind, "message": message, "path": field }));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "name": "ValidationError",
            "_message": "Validation failed",
            "message": self.message,
            "errors": self.errors,
        })
    }
}
