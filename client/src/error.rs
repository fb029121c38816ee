//! Client error type.

use std::path::PathBuf;

/// Failures surfaced by the API client, session storage and client state.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("server responded {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Decoding failure description.
        message: String,
    },
    /// The session file could not be read, written or removed.
    #[error("session storage failed at {path}: {message}")]
    Storage {
        /// Session file location.
        path: PathBuf,
        /// Failure description.
        message: String,
    },
    /// An authenticated action was attempted without a session.
    #[error("not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// Whether the server rejected the request as unauthenticated.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}
