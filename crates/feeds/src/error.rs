//! Feed error types

use thiserror::Error;

/// Errors produced while fetching or decoding upstream feed data
#[derive(Error, Debug)]
pub enum FeedError {
    /// Upstream answered with a non-2xx status. Hard failure, never retried.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Every attempt produced a transiently invalid response
    /// (non-JSON content type, unparsable body, or an error envelope).
    #[error("invalid JSON after {attempts} attempts: {url}")]
    RetryExhausted { url: String, attempts: u32 },

    /// The body parsed as JSON but did not match the expected schema
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Network-level failure (connect, timeout, TLS, body read)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

impl FeedError {
    /// Create a shape error
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }
}
