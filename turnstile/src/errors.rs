use http::StatusCode;
use thiserror::Error;

/// Fault taxonomy for a single interceptor invocation.
///
/// Everything an interceptor can do wrong reaches the adapter as one of
/// these two shapes, and the adapter normalizes both into an [`HttpError`]
/// before the engine sees anything.
#[derive(Debug, Error)]
pub enum InterceptError {
    /// The interceptor itself failed. The message is surfaced verbatim
    /// with status 500.
    #[error("{0}")]
    Fault(#[from] anyhow::Error),

    /// The interceptor handed back something that is not an
    /// `OnPreAuthResult`. The payload is the stringified foreign value.
    #[error("Unexpected result from OnPreAuth. Expected OnPreAuthResult, but given: {0}.")]
    Unexpected(String),
}

/// The one error shape the engine boundary recognizes.
///
/// Returned directly as the hook handler's result; the engine renders it
/// as the final response for the request and runs no further lifecycle
/// stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct HttpError {
    message: String,
    status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// 500 with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<InterceptError> for HttpError {
    fn from(err: InterceptError) -> Self {
        Self::internal(err.to_string())
    }
}
