//! Error types for SES operations.

use thiserror::Error;

/// Errors returned by the SES client.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request and reported a structured error.
    #[error("SES error {code} (status {status}): {message}")]
    Api {
        /// The `<Code>` reported by SES, or `UnknownError` when absent.
        code: String,
        /// HTTP status of the response.
        status: u16,
        /// The `<Message>` reported by SES, or the raw body as a fallback.
        message: String,
        /// The `<RequestId>` when present in the response.
        request_id: Option<String>,
    },

    /// Transport-level failure: connect, TLS, timeout, or body read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Template data could not be serialized to JSON.
    #[error("failed to serialize template data: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint URL given to the builder is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl Error {
    /// The SES error code, when this is an [`Error::Api`].
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The HTTP status, when this is an [`Error::Api`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
