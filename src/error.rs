//! Error taxonomy and HTTP/reqwest mapping helpers.

use std::time::Duration;

/// Errors from chat requests and stream decoding.
///
/// Malformed individual NDJSON lines are *not* represented here: they are
/// recoverable, logged at warn level, and skipped without affecting
/// neighboring lines. This enum covers only failures that end the request.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Network-level error (connection reset, DNS failure, body read error).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Server is temporarily unavailable (5xx).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Requested model does not exist (404).
    #[error("model not found: {0}")]
    ModelNotFound(String),
    /// Malformed or invalid request (400, or any unmapped status).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Non-streaming response body failed to parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A stream line grew past the configured cap without a terminator.
    ///
    /// Distinct from [`ChatError::Network`] so callers can tell bad protocol
    /// data apart from a dropped connection.
    #[error("stream line exceeded {limit} bytes without a newline")]
    OversizedLine {
        /// The configured line-size cap that was exceeded.
        limit: usize,
    },
}

impl ChatError {
    /// Whether this error is likely transient and the request can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::ServiceUnavailable(_)
        )
    }
}

/// Map an HTTP status code (from the Ollama API) to a [`ChatError`].
///
/// Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md>
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ChatError {
    match status.as_u16() {
        404 => ChatError::ModelNotFound(body.to_string()),
        400 => ChatError::InvalidRequest(body.to_string()),
        500..=599 => ChatError::ServiceUnavailable(body.to_string()),
        _ => ChatError::InvalidRequest(format!("HTTP {status}: {body}")),
    }
}

/// Map a [`reqwest::Error`] to a [`ChatError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout(Duration::from_secs(30))
    } else {
        ChatError::Network(Box::new(err))
    }
}
