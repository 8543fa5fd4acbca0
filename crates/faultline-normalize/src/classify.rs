use std::sync::Arc;

use faultline_core::ValidationError;

use crate::{Failure, FailureAdapter};

/// Which path a raw failure takes through normalization
#[derive(Debug, Clone, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Classification {
    /// Not structured: wrapped as a fallback with its string form
    Scalar,
    /// A runtime fault: wrapped as an internal error
    Runtime,
    /// Recognized by a registered adapter, already converted
    Adapted(ValidationError),
    /// Already part of the taxonomy: passed through
    Typed,
    /// Structured but unrecognized: wrapped as a fallback carrying the value
    Unknown,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// Decide the normalization path for a failure
///
/// Checks run in a fixed order: scalar values, runtime faults, registered
/// adapters in registration order, then taxonomy membership.
pub fn classify(failure: &Failure, adapters: &[Arc<dyn FailureAdapter>]) -> Classification {
    if !failure.is_structured() {
        return Classification::Scalar;
    }

    if matches!(failure, Failure::Runtime(_)) {
        return Classification::Runtime;
    }

    for adapter in adapters {
        if let Some(error) = adapter.adapt(failure) {
            tracing::trace!(adapter = adapter.name(), "failure recognized by adapter");
            return Classification::Adapted(error);
        }
    }

    if matches!(failure, Failure::Typed(_)) {
        Classification::Typed
    } else {
        Classification::Unknown
    }
}
