use std::sync::Arc;

use faultline_adapters::MapperValidation;
use faultline_core::{
    FallbackError, InternalError, NormalizedError, RuntimeFault, SendMailError, ValidationError,
};
use serde_json::Value;

/// Downcast an error to a runtime fault or taxonomy leaf
///
/// Works on anything with a `downcast_ref::<T>()`, so both boxed errors and
/// `anyhow::Error` context chains go through the same checks.
macro_rules! recover {
    ($error:expr) => {{
        let error = &$error;
        if let Some(fault) = error.downcast_ref::<RuntimeFault>() {
            Some(Failure::Runtime(fault.clone()))
        } else if let Some(typed) = error.downcast_ref::<NormalizedError>() {
            Some(Failure::Typed(typed.clone()))
        } else if let Some(typed) = error.downcast_ref::<ValidationError>() {
            Some(Failure::from(typed.clone()))
        } else if let Some(typed) = error.downcast_ref::<SendMailError>() {
            Some(Failure::from(typed.clone()))
        } else if let Some(typed) = error.downcast_ref::<InternalError>() {
            Some(Failure::from(typed.clone()))
        } else if let Some(typed) = error.downcast_ref::<FallbackError>() {
            Some(Failure::from(typed.clone()))
        } else {
            None
        }
    }};
}

/// A raw failure as raised by application code, before classification
#[derive(Debug, Clone)]
pub enum Failure {
    /// An arbitrary value, possibly not structured at all
    Value(Value),
    /// A fault raised by the execution engine
    Runtime(RuntimeFault),
    /// An error that is already part of the taxonomy
    Typed(NormalizedError),
    /// Any other error
    Error(Arc<dyn std::error::Error + Send + Sync>),
}

impl Failure {
    /// Wrap an arbitrary error
    ///
    /// Runtime faults and taxonomy leaves keep their identity.
    pub fn error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Error(Arc::new(error)).resolve()
    }

    /// Recover a runtime fault or typed error hidden behind [`Failure::Error`]
    #[must_use]
    pub fn resolve(self) -> Self {
        match self {
            Self::Error(error) => recover!(error).unwrap_or(Self::Error(error)),
            other => other,
        }
    }

    /// Whether this failure carries structure beyond a single scalar
    pub const fn is_structured(&self) -> bool {
        match self {
            Self::Value(value) => matches!(value, Value::Object(_) | Value::Array(_)),
            Self::Runtime(_) | Self::Typed(_) | Self::Error(_) => true,
        }
    }
}

impl From<Arc<dyn std::error::Error + Send + Sync>> for Failure {
    fn from(error: Arc<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Error(error).resolve()
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Failure {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Error(Arc::from(error)).resolve()
    }
}

impl From<Value> for Failure {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::Value(Value::String(message.to_owned()))
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::Value(Value::String(message))
    }
}

impl From<RuntimeFault> for Failure {
    fn from(fault: RuntimeFault) -> Self {
        Self::Runtime(fault)
    }
}

impl From<NormalizedError> for Failure {
    fn from(error: NormalizedError) -> Self {
        Self::Typed(error)
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Self::Typed(error.into())
    }
}

impl From<SendMailError> for Failure {
    fn from(error: SendMailError) -> Self {
        Self::Typed(error.into())
    }
}

impl From<InternalError> for Failure {
    fn from(error: InternalError) -> Self {
        Self::Typed(error.into())
    }
}

impl From<FallbackError> for Failure {
    fn from(error: FallbackError) -> Self {
        Self::Typed(error.into())
    }
}

impl From<MapperValidation> for Failure {
    fn from(failure: MapperValidation) -> Self {
        Self::error(failure)
    }
}

/// Recover the concrete failure behind an `anyhow::Error`
///
/// Runtime faults, taxonomy leaves and mapper validation failures keep
/// their identity; anything else becomes [`Failure::Error`].
impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        if let Some(failure) = recover!(error) {
            return failure;
        }

        match error.downcast::<MapperValidation>() {
            Ok(failure) => failure.into(),
            Err(error) => {
                let boxed: Box<dyn std::error::Error + Send + Sync> = error.into();
                Self::Error(Arc::from(boxed))
            }
        }
    }
}
