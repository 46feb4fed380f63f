//! Error types for HTTP requests against Google APIs.
//!
//! [`TransportError`] is what the request stack itself can fail with (no
//! response was obtained). [`RequestError`] is what callers see once a
//! response has been classified and decoded.

use reqwest::StatusCode;

/// A request failed before a response was received.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client reported a failure.
    #[error("HTTP transport failure: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be built (bad URL, bad body).
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request
        reason: String,
    },

    /// No access token could be obtained for the request.
    #[error("Failed to obtain access token: {reason}")]
    Token {
        /// Why the token provider failed
        reason: String,
    },
}

impl TransportError {
    /// Whether retrying the same request may succeed.
    ///
    /// Connection failures, timeouts, send failures and a connection lost
    /// while reading the body are recoverable. Malformed requests and token
    /// failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.is_request()
                    || err.is_body()
                    || err.is_decode()
            }
            TransportError::InvalidRequest { .. } | TransportError::Token { .. } => false,
        }
    }
}

/// Errors surfaced by API calls.
///
/// Transient statuses never appear here unless the configured retry policy is
/// bounded and ran out of attempts.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// No response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        /// HTTP method of the failed request
        method: String,
        /// URL of the failed request
        url: String,
        /// Response status
        status: StatusCode,
        /// Response body, usually a Google error document
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("Failed to decode response from {url}")]
    Decode {
        /// URL of the request whose response failed to decode
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl RequestError {
    /// Status code of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
