use std::sync::Arc;

use faultline_adapters::{SchemaAdapter, SchemaError};
use faultline_config::NormalizerConfig;
use faultline_core::{Branch, FallbackError, InternalError, NormalizedError, TypedError};

use crate::{Classification, Failure, FailureAdapter, MapperAdapter, classify};

/// Turns raw failures into exactly one typed error
///
/// Cheap to clone and safe to share across request handlers: the adapter
/// registry and options are fixed at construction.
#[derive(Clone)]
pub struct Normalizer {
    adapters: Vec<Arc<dyn FailureAdapter>>,
    schema: SchemaAdapter,
    validation_trivial: bool,
    log_untrivial: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::default())
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let adapters: Vec<_> = self.adapters.iter().map(|adapter| adapter.name()).collect();

        f.debug_struct("Normalizer")
            .field("adapters", &adapters)
            .field("schema", &self.schema)
            .field("validation_trivial", &self.validation_trivial)
            .field("log_untrivial", &self.log_untrivial)
            .finish()
    }
}

impl Normalizer {
    /// Start from an empty adapter registry
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    /// Build from configuration
    pub fn from_config(config: &NormalizerConfig) -> Self {
        let mut builder = Self::builder()
            .validation_trivial(config.validation_trivial)
            .log_untrivial(config.log_untrivial)
            .schema_message(config.schema.message.as_str());

        if config.mapper_adapter {
            builder = builder.adapter(MapperAdapter);
        }

        builder.build()
    }

    /// Adapter for schema validator errors, carrying the configured message
    pub const fn schema(&self) -> &SchemaAdapter {
        &self.schema
    }

    /// Convert schema validator errors into a typed error
    pub fn schema_errors(&self, errors: impl IntoIterator<Item = SchemaError>) -> NormalizedError {
        self.schema
            .convert(errors)
            .trivial(self.validation_trivial)
            .into()
    }

    /// Normalize a raw failure
    ///
    /// Never fails: every input yields exactly one taxonomy leaf. Errors that
    /// are already typed come back unchanged.
    pub fn normalize(&self, failure: impl Into<Failure>) -> NormalizedError {
        let failure = failure.into().resolve();
        let classification = classify(&failure, &self.adapters);
        let label = classification.label();

        let normalized: NormalizedError = match classification {
            Classification::Adapted(error) => error.trivial(self.validation_trivial).into(),
            Classification::Scalar | Classification::Runtime | Classification::Typed | Classification::Unknown => {
                wrap(failure)
            }
        };

        self.record(label, &normalized);

        normalized
    }

    /// Normalize a failure and hand it to the next stage
    ///
    /// The request context is forwarded to `next` untouched.
    pub fn dispatch<C, R>(
        &self,
        failure: impl Into<Failure>,
        context: C,
        next: impl FnOnce(NormalizedError, C) -> R,
    ) -> R {
        next(self.normalize(failure), context)
    }

    fn record(&self, classification: &'static str, error: &NormalizedError) {
        tracing::debug!(
            classification,
            kind = %error.kind(),
            code = error.code().unwrap_or("-"),
            status = error.status_hint().as_u16(),
            trivial = error.is_trivial(),
            "failure normalized"
        );

        if self.log_untrivial && !error.is_trivial() && error.branch() == Branch::Server {
            tracing::warn!(
                code = error.code().unwrap_or("-"),
                error_message = error.message(),
                data = ?error.data(),
                "server failure while handling request"
            );
        }
    }
}

/// Wrap a failure no adapter claimed, by its variant
fn wrap(failure: Failure) -> NormalizedError {
    match failure {
        Failure::Value(value) => FallbackError::from_value(value).into(),
        Failure::Runtime(fault) => InternalError::new(fault).into(),
        Failure::Typed(typed) => typed,
        Failure::Error(error) => FallbackError::from_error(error).into(),
    }
}

/// Builder for [`Normalizer`]
#[derive(Default)]
pub struct NormalizerBuilder {
    adapters: Vec<Arc<dyn FailureAdapter>>,
    schema_message: Option<String>,
    validation_trivial: Option<bool>,
    log_untrivial: Option<bool>,
}

impl NormalizerBuilder {
    /// Register an adapter; adapters are consulted in registration order
    #[must_use]
    pub fn adapter(mut self, adapter: impl FailureAdapter + 'static) -> Self {
        self.adapters.push(Arc::new(adapter));
        self
    }

    #[must_use]
    pub fn schema_message(mut self, message: impl Into<String>) -> Self {
        self.schema_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn validation_trivial(mut self, trivial: bool) -> Self {
        self.validation_trivial = Some(trivial);
        self
    }

    #[must_use]
    pub fn log_untrivial(mut self, enabled: bool) -> Self {
        self.log_untrivial = Some(enabled);
        self
    }

    pub fn build(self) -> Normalizer {
        Normalizer {
            adapters: self.adapters,
            schema: self.schema_message.map(SchemaAdapter::new).unwrap_or_default(),
            validation_trivial: self.validation_trivial.unwrap_or(true),
            log_untrivial: self.log_untrivial.unwrap_or(true),
        }
    }
}
