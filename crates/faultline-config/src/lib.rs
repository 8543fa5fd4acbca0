#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod logging;
pub mod normalizer;

use serde::Deserialize;

pub use logging::*;
pub use normalizer::*;

/// Top-level faultline configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Normalization pipeline configuration
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
