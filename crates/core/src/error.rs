//! Client Error Types
//!
//! Failure taxonomy shared by every `VerifyApi` implementation and the
//! session controllers built on top of them.
//!
//! - `Network`: no response was received (server unreachable, aborted, timed out)
//! - `Request`: a response arrived with a non-success status
//! - `Validation`: the caller violated a precondition; no request was issued
//! - `Parse`: a success response whose body did not match the contract

use thiserror::Error;

/// Error type for backend API calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Transport-level failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-success status. Displays the server-supplied message verbatim so
    /// it can be shown to the user as-is.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Precondition violated by the caller
    #[error("Validation error: {0}")]
    Validation(String),

    /// Success status but undecodable body
    #[error("Parse error: {message}")]
    Parse { message: String },
}

/// Result type alias for client errors
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
        }
    }

    /// Create a request error for the given status
    pub fn request(status: u16, msg: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: msg.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Whether the error happened before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// The message suitable for an error banner.
    ///
    /// Request errors carry the backend `detail` untouched; the other kinds
    /// use their display form.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Request { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ClientError> for String {
    fn from(err: ClientError) -> String {
        err.to_string()
    }
}
