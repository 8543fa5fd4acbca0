//! Closed taxonomy of typed request errors
//!
//! Every failure that leaves the request pipeline is exactly one leaf of
//! this taxonomy. The leaves share the [`TypedError`] capability set so the
//! response layer can map status, code and message without knowing which
//! leaf it holds.

#![allow(clippy::must_use_candidate)]

mod error;
mod fallback;
mod fault;
pub mod fields;
mod normalized;
mod server;
mod validation;

pub use error::{Branch, ErrorKind, TypedError};
pub use fallback::FallbackError;
pub use fault::{RuntimeFault, RuntimeFaultKind};
pub use fields::{FieldDetail, FieldIssue, FieldMap, summarize, summarize_data};
pub use normalized::{ClientView, NormalizedError};
pub use server::{InternalError, SendMailError};
pub use validation::ValidationError;
