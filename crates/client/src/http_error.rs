//! HTTP Error Mapping
//!
//! Converts transport failures and non-success responses into `ClientError`.

use serde::Deserialize;

use aqua_verify_core::error::ClientError;

/// Fallback banner text when `POST /analyze` fails without a `detail`.
pub const ANALYZE_FALLBACK_MESSAGE: &str = "Erreur lors de l'analyse";

/// Fallback text when `POST /chat` fails without a `detail`.
pub const CHAT_FALLBACK_MESSAGE: &str = "Erreur de communication avec le chatbot";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pull the `detail` string out of a backend error body.
///
/// Returns `None` for non-JSON bodies and for structured details (such as
/// request-validation error lists) that have no single message.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

/// Build the error for a non-success response.
pub fn parse_http_error(status: u16, body: &str, fallback: &str) -> ClientError {
    let message = extract_detail(body).unwrap_or_else(|| fallback.to_string());
    ClientError::request(status, message)
}

/// Map a `reqwest` failure that happened before a response was read.
pub fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::network(format!("request timed out: {}", err))
    } else if err.is_connect() {
        ClientError::network(format!("server unreachable: {}", err))
    } else {
        ClientError::network(err.to_string())
    }
}
