//! API error handling for the Distributed client.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Error produced by a single API call.
///
/// Only [`ApiError::Server`] carries a message meant for the user; every other
/// variant is a diagnostic for the log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered 500 with an error message.
    #[error("{message}")]
    Server {
        /// User-facing message, already unwrapped from any structured error.
        message: String,
    },

    /// The server answered with a status other than 200 or 500.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// The request never produced a complete response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request payload could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Create a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// The message to show the user, if this error has one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message } => Some(message),
            _ => None,
        }
    }
}

/// Structured error some backends encode as a JSON string inside `error`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerErrorDetail {
    /// Service identifier.
    #[serde(default)]
    pub id: String,
    /// Numeric code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable detail.
    pub detail: String,
    /// Status text.
    #[serde(default)]
    pub status: String,
}

/// Body of a failed response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Value,
}

/// Extract the user-facing message from a 500 response body.
///
/// The `error` field is either plain text or a JSON-encoded
/// [`ServerErrorDetail`]; in the latter case its `Detail` is returned. A
/// brace-prefixed value that fails to parse is returned verbatim.
pub fn server_error_message(body: &str) -> Result<String, ApiError> {
    let body: ErrorBody =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("error body: {e}")))?;

    match body.error {
        Value::String(raw) => Ok(unwrap_detail(raw)),
        Value::Object(map) => match map.get("Detail") {
            Some(Value::String(detail)) => Ok(detail.clone()),
            _ => Ok(Value::Object(map).to_string()),
        },
        Value::Null => Err(ApiError::Decode("error body: null error".to_string())),
        other => Ok(other.to_string()),
    }
}

fn unwrap_detail(raw: String) -> String {
    if !raw.trim_start().starts_with('{') {
        return raw;
    }
    match serde_json::from_str::<ServerErrorDetail>(&raw) {
        Ok(detail) => detail.detail,
        Err(_) => raw,
    }
}
