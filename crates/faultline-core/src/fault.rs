use serde::{Deserialize, Serialize};

/// Kinds of fault raised by the execution engine itself
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum RuntimeFaultKind {
    #[strum(serialize = "EvalError")]
    #[serde(rename = "EvalError")]
    Eval,
    #[strum(serialize = "TypeError")]
    #[serde(rename = "TypeError")]
    Type,
    #[strum(serialize = "RangeError")]
    #[serde(rename = "RangeError")]
    Range,
    #[strum(serialize = "ReferenceError")]
    #[serde(rename = "ReferenceError")]
    Reference,
    #[strum(serialize = "SyntaxError")]
    #[serde(rename = "SyntaxError")]
    Syntax,
    #[strum(serialize = "URIError")]
    #[serde(rename = "URIError")]
    Uri,
}

/// A runtime fault as raised, before classification
///
/// Kept whole inside an `InternalError` for operators; never echoed to
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RuntimeFault {
    #[serde(rename = "name")]
    pub kind: RuntimeFaultKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl RuntimeFault {
    pub fn new(kind: RuntimeFaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
