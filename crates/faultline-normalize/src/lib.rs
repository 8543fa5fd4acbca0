//! Single-pass normalization of raw failures into typed errors
//!
//! A [`Normalizer`] takes any [`Failure`] raised while handling a request and
//! always produces exactly one [`NormalizedError`]. It never fails, holds no
//! mutable state, and can be shared freely between request handlers.
//!
//! [`NormalizedError`]: faultline_core::NormalizedError

#![allow(clippy::must_use_candidate)]

mod adapter;
mod classify;
mod failure;
mod pipeline;

pub use adapter::{FailureAdapter, FnAdapter, MapperAdapter};
pub use classify::{Classification, classify};
pub use failure::Failure;
pub use pipeline::{Normalizer, NormalizerBuilder};
