//! Converters from upstream validation failures to [`ValidationError`]
//!
//! Two upstream shapes are understood: the validation failure of a
//! database mapper (a message plus per-field `{kind, message}` errors) and
//! the error list of a JSON schema validator.
//!
//! [`ValidationError`]: faultline_core::ValidationError

#![allow(clippy::must_use_candidate)]

mod error;
pub mod mapper;
pub mod schema;

pub use error::AdapterError;
pub use mapper::{MapperErrors, MapperFieldError, MapperValidation, from_mapper_validation};
pub use schema::{SchemaAdapter, SchemaError, SchemaErrors, from_schema_errors};
