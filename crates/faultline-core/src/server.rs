use serde_json::Value;

use crate::{
    error::{ErrorKind, TypedError},
    fault::RuntimeFault,
};

/// Downstream notification delivery failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SendMailError {
    message: String,
    data: Option<Value>,
    trivial: bool,
}

impl SendMailError {
    /// Create with an optional message and free-form diagnostic payload
    pub fn new(message: Option<String>, data: Option<Value>) -> Self {
        let message = match message {
            Some(message) if !message.is_empty() => message,
            _ => ErrorKind::SendMail.default_message().to_owned(),
        };

        Self {
            message,
            data,
            trivial: ErrorKind::SendMail.default_trivial(),
        }
    }

    #[must_use]
    pub fn trivial(mut self, trivial: bool) -> Self {
        self.trivial = trivial;
        self
    }
}

impl TypedError for SendMailError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::SendMail
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

/// A runtime fault surfaced while handling a request
///
/// The original fault is kept for operators and exposed through
/// [`TypedError::data`]; callers only ever see the generic message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InternalError {
    message: String,
    #[source]
    fault: RuntimeFault,
    trivial: bool,
}

impl InternalError {
    pub fn new(fault: RuntimeFault) -> Self {
        Self {
            message: ErrorKind::Internal.default_message().to_owned(),
            fault,
            trivial: ErrorKind::Internal.default_trivial(),
        }
    }

    /// The fault this error wraps
    pub const fn fault(&self) -> &RuntimeFault {
        &self.fault
    }

    pub fn into_fault(self) -> RuntimeFault {
        self.fault
    }
}

impl From<RuntimeFault> for InternalError {
    fn from(fault: RuntimeFault) -> Self {
        Self::new(fault)
    }
}

impl TypedError for InternalError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Internal
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn data(&self) -> Option<Value> {
        serde_json::to_value(&self.fault).ok()
    }

    fn is_trivial(&self) -> bool {
        self.trivial
    }
}
