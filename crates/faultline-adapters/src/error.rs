use thiserror::Error;

/// Errors decoding upstream failure payloads
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Payload is not valid JSON or does not have the expected shape
    #[error("malformed {shape} payload: {source}")]
    Malformed {
        /// Which upstream shape was expected
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl AdapterError {
    pub(crate) fn malformed(shape: &'static str, source: serde_json::Error) -> Self {
        Self::Malformed { shape, source }
    }
}
