use serde::Deserialize;

/// Normalization pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Register the built-in database mapper validation adapter
    #[serde(default = "default_true")]
    pub mapper_adapter: bool,
    /// Triviality given to validation errors produced by adapters
    #[serde(default = "default_true")]
    pub validation_trivial: bool,
    /// Log non-trivial server-side failures at warn level
    #[serde(default = "default_true")]
    pub log_untrivial: bool,
    /// Schema validator adapter settings
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            mapper_adapter: true,
            validation_trivial: true,
            log_untrivial: true,
            schema: SchemaConfig::default(),
        }
    }
}

/// Schema validator adapter settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Top-level message of schema validation failures
    #[serde(default = "default_schema_message")]
    pub message: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            message: default_schema_message(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

fn default_schema_message() -> String {
    "Invalid request data".to_owned()
}
