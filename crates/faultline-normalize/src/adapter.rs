use faultline_adapters::{MapperValidation, from_mapper_validation};
use faultline_core::ValidationError;

use crate::Failure;

/// Recognizes an upstream failure shape and converts it
///
/// Adapters are registered on a [`Normalizer`](crate::Normalizer) and
/// consulted in registration order after runtime faults are ruled out. The
/// first adapter to return a [`ValidationError`] wins.
pub trait FailureAdapter: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Convert the failure if it has the shape this adapter understands
    fn adapt(&self, failure: &Failure) -> Option<ValidationError>;
}

/// Adapter for database mapper validation failures
///
/// Matches the mapper shape either as a JSON value or as a boxed
/// [`MapperValidation`] error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperAdapter;

impl FailureAdapter for MapperAdapter {
    fn name(&self) -> &str {
        "mapper"
    }

    fn adapt(&self, failure: &Failure) -> Option<ValidationError> {
        match failure {
            Failure::Value(value) => MapperValidation::from_value(value).map(|mapper| from_mapper_validation(&mapper)),
            Failure::Error(error) => error.downcast_ref::<MapperValidation>().map(from_mapper_validation),
            Failure::Runtime(_) | Failure::Typed(_) => None,
        }
    }
}

/// Adapter assembled from a predicate and a converter
pub struct FnAdapter<P, C> {
    name: String,
    predicate: P,
    convert: C,
}

impl<P, C> FnAdapter<P, C>
where
    P: Fn(&Failure) -> bool + Send + Sync,
    C: Fn(&Failure) -> ValidationError + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: P, convert: C) -> Self {
        Self {
            name: name.into(),
            predicate,
            convert,
        }
    }
}

impl<P, C> FailureAdapter for FnAdapter<P, C>
where
    P: Fn(&Failure) -> bool + Send + Sync,
    C: Fn(&Failure) -> ValidationError + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn adapt(&self, failure: &Failure) -> Option<ValidationError> {
        (self.predicate)(failure).then(|| (self.convert)(failure))
    }
}

impl<P, C> std::fmt::Debug for FnAdapter<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAdapter").field("name", &self.name).finish_non_exhaustive()
    }
}
