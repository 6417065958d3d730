//! Error types for gateway operations.

use thiserror::Error;

use crate::transport::HttpError;

/// Failure of a single request attempt.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request could not be completed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The gateway answered with a non-2xx status.
    #[error("Gateway returned {status}")]
    NonSuccessStatus {
        /// HTTP status code
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },
}

impl RequestError {
    /// Returns true if the same request may be attempted again.
    ///
    /// Every non-2xx status is retried; of the transport errors only an
    /// invalid URL is not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::NonSuccessStatus { .. } => true,
        }
    }
}

/// Error type for gateway operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The media type is not one the gateway can send.
    ///
    /// Raised before any request is made.
    #[error("Unsupported media type '{0}': expected image, video, audio or document")]
    UnsupportedMediaType(String),

    /// The endpoint URL could not be built from the configured base URL.
    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The API key cannot be sent as an HTTP header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// The request payload could not be encoded.
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// A request failed in a way retrying cannot fix.
    #[error("Request failed: {0}")]
    Request(#[source] RequestError),

    /// Every attempt failed.
    #[error("Request failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: RequestError,
    },

    /// The gateway answered 2xx with a body that is not JSON.
    #[error("Gateway response is not valid JSON: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

impl ProviderError {
    /// Returns the HTTP status of the last failed attempt, if the gateway answered.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Request(RequestError::NonSuccessStatus { status, .. })
            | Self::RetriesExhausted {
                last_error: RequestError::NonSuccessStatus { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}
