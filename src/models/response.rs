//! Response Types
//!
//! Uniform envelopes returned by the command handlers.

use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Generic command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwrap the envelope, yielding the error message on failure
    pub fn into_result(self) -> Result<T, String> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(self
                .error
                .unwrap_or_else(|| "Command returned no data".to_string())),
        }
    }
}

impl<T> From<Result<T, AppError>> for CommandResponse<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Backend health as seen from the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unreachable"
    pub status: String,
    pub version: String,
    pub service: String,
    pub api_base_url: String,
    pub backend: bool,
}

impl HealthResponse {
    pub fn new(api_base_url: impl Into<String>, backend: bool) -> Self {
        Self {
            status: if backend { "healthy" } else { "unreachable" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: "aqua-verify".to_string(),
            api_base_url: api_base_url.into(),
            backend,
        }
    }
}
