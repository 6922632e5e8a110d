//! Error types for Azure DevOps REST operations
//!
//! The taxonomy separates lookup misses (recoverable during identifier
//! resolution) from fatal failures, and keeps timeouts distinct from
//! not-found.

use thiserror::Error;

/// Errors that can occur when calling the Azure DevOps REST API
#[derive(Error, Debug)]
pub enum AdoError {
    /// The entity does not exist (HTTP 404)
    #[error("entity not found")]
    NotFound,

    /// The credential was rejected or lacks permission (HTTP 401/403)
    #[error("not authorized (HTTP {status}) - check the personal access token and its scopes")]
    Unauthorized {
        /// HTTP status code returned by the backend
        status: u16,
    },

    /// The backend rejected the request as malformed (HTTP 400)
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Error message returned by the backend
        message: String,
    },

    /// Any other non-success response
    #[error("Azure DevOps API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Error message returned by the backend
        message: String,
    },

    /// A bounded call did not complete in time
    #[error("request timed out")]
    Timeout,

    /// The backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// The response body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl AdoError {
    /// Whether this error is a recoverable lookup miss.
    ///
    /// During identifier resolution a 404 and a 400 (e.g. a display name
    /// where a GUID was expected) both mean "try the next candidate";
    /// everything else propagates.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, AdoError::NotFound | AdoError::InvalidRequest { .. })
    }
}

impl From<reqwest::Error> for AdoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdoError::Timeout
        } else if e.is_decode() {
            AdoError::Parse(e.to_string())
        } else {
            AdoError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AdoError {
    fn from(e: serde_json::Error) -> Self {
        AdoError::Parse(e.to_string())
    }
}

/// Result type alias for Azure DevOps operations
pub type AdoResult<T> = Result<T, AdoError>;
