use http::StatusCode;
use serde_json::Value;

/// Generic message surfaced to callers for server-side failures
const GENERIC_CLIENT_MESSAGE: &str = "Internal server error";

/// Which party caused a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Branch {
    /// The caller's input was at fault
    Client,
    /// The system's own operation failed
    Server,
    /// Nothing about the input allowed a classification
    Unclassified,
}

/// Leaf kinds of the taxonomy
///
/// The metadata here is fixed per leaf and is the only process-wide state
/// the taxonomy carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ErrorKind {
    #[strum(serialize = "ValidationError")]
    Validation,
    #[strum(serialize = "SendMailError")]
    SendMail,
    #[strum(serialize = "InternalError")]
    Internal,
    #[strum(serialize = "FallbackError")]
    Fallback,
}

impl ErrorKind {
    /// Stable machine-readable code, absent for the fallback leaf
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::Validation => Some("NOT_VALIDATED"),
            Self::SendMail => Some("MAILER_ERROR"),
            Self::Internal => Some("INTERNAL_ERROR"),
            Self::Fallback => None,
        }
    }

    /// Message used when a leaf is constructed without one
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Validation => "Validation error",
            Self::SendMail => "Failed to send mail",
            Self::Internal => "Internal error",
            Self::Fallback => "Unknown error",
        }
    }

    pub const fn status_hint(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SendMail | Self::Internal | Self::Fallback => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn branch(self) -> Branch {
        match self {
            Self::Validation => Branch::Client,
            Self::SendMail | Self::Internal => Branch::Server,
            Self::Fallback => Branch::Unclassified,
        }
    }

    /// Whether instances of this leaf are expected during normal operation
    pub const fn default_trivial(self) -> bool {
        match self {
            Self::Validation | Self::Fallback => true,
            Self::SendMail | Self::Internal => false,
        }
    }
}

/// Capability set shared by every leaf of the taxonomy
///
/// The response layer maps [`status_hint`](Self::status_hint) to a transport
/// status and serializes code, message and data. Only client-branch leaves
/// expose their detail through [`client_message`](Self::client_message) and
/// [`client_data`](Self::client_data).
pub trait TypedError: std::error::Error + Send + Sync {
    /// Leaf kind of this error
    fn kind(&self) -> ErrorKind;

    /// Human-readable message
    fn message(&self) -> &str;

    /// Structured payload, if any
    fn data(&self) -> Option<Value>;

    /// Whether the failure is expected rather than noteworthy
    fn is_trivial(&self) -> bool;

    /// Stable machine-readable code
    fn code(&self) -> Option<&'static str> {
        self.kind().code()
    }

    /// HTTP status the response layer should use
    fn status_hint(&self) -> StatusCode {
        self.kind().status_hint()
    }

    fn branch(&self) -> Branch {
        self.kind().branch()
    }

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String {
        match self.branch() {
            Branch::Client => self.message().to_owned(),
            Branch::Server | Branch::Unclassified => GENERIC_CLIENT_MESSAGE.to_owned(),
        }
    }

    /// Payload safe to expose to API consumers
    fn client_data(&self) -> Option<Value> {
        match self.branch() {
            Branch::Client => self.data(),
            Branch::Server | Branch::Unclassified => None,
        }
    }
}
