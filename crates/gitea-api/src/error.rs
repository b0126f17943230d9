//! Error type shared by every request helper.

use thiserror::Error;

/// Errors returned by the request helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside the 2xx range.
    #[error("Request failed: {status} {status_text}")]
    RequestFailed { status: u16, status_text: String },

    /// The transport could not complete the exchange (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON or did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A header value (usually the API key) is not a valid HTTP header value.
    #[error("invalid header value for {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// HTTP status carried by a [`ApiError::RequestFailed`].
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
