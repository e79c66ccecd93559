//! API client errors.

use thiserror::Error;

/// Failure categories surfaced to pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received
    Network,
    /// A response arrived with a non-2xx status
    Status,
    /// The response body could not be parsed
    Malformed,
    /// The request body could not be serialized
    Encode,
}

/// Errors returned by [`ApiClient`](super::ApiClient) calls
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { message: String, timeout: bool },

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response ({status}): {message}")]
    Malformed { status: u16, message: String },

    #[error("Request encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } => ErrorKind::Network,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Malformed { .. } => ErrorKind::Malformed,
            ApiError::Encode(_) => ErrorKind::Encode,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Malformed { status, .. } => Some(*status),
            ApiError::Network { .. } | ApiError::Encode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Build a status error from an error response body
    ///
    /// Prefers the backend's `detail` field, then the raw body, then the reason phrase.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) if !other.is_null() => Some(other.to_string()),
                _ => None,
            });

        let message = match detail {
            Some(detail) => detail,
            None if !body.trim().is_empty() => body.trim().to_string(),
            None => reason_phrase(status).to_string(),
        };

        ApiError::Status { status, message }
    }
}

/// Transport-level failure: nothing usable came back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timeout: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: true,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network {
            message: err.message,
            timeout: err.timeout,
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unexpected status",
    }
}
