use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{
    error::{ErrorKind, TypedError},
    fallback::FallbackError,
    server::{InternalError, SendMailError},
    validation::ValidationError,
};

/// The single typed error handed to the response stage
#[derive(Debug, Clone, thiserror::Error)]
pub enum NormalizedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    SendMail(#[from] SendMailError),
    #[error(transparent)]
    Internal(#[from] InternalError),
    #[error(transparent)]
    Fallback(#[from] FallbackError),
}

impl NormalizedError {
    fn as_typed(&self) -> &dyn TypedError {
        match self {
            Self::Validation(error) => error,
            Self::SendMail(error) => error,
            Self::Internal(error) => error,
            Self::Fallback(error) => error,
        }
    }

    /// Client-safe projection for response bodies
    pub fn client_view(&self) -> ClientView {
        ClientView {
            code: self.code(),
            message: self.client_message(),
            status: self.status_hint().as_u16(),
            data: self.client_data(),
        }
    }
}

impl TypedError for NormalizedError {
    fn kind(&self) -> ErrorKind {
        self.as_typed().kind()
    }

    fn message(&self) -> &str {
        self.as_typed().message()
    }

    fn data(&self) -> Option<Value> {
        self.as_typed().data()
    }

    fn is_trivial(&self) -> bool {
        self.as_typed().is_trivial()
    }
}

/// Full envelope: `message` is always serialized, whatever the leaf
#[derive(Serialize)]
struct Envelope<'a> {
    code: Option<&'static str>,
    message: &'a str,
    status: u16,
    is_trivial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl Serialize for NormalizedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            code: self.code(),
            message: self.message(),
            status: self.status_hint().as_u16(),
            is_trivial: self.is_trivial(),
            data: self.data(),
        }
        .serialize(serializer)
    }
}

/// What a caller may see of a normalized error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientView {
    pub code: Option<&'static str>,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
