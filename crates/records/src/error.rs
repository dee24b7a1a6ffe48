//! Record store error types.

use thiserror::Error;

/// Record store operation errors.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the store, body passed through verbatim.
    #[error("store error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Invalid(#[from] vrnt_core::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for record store operations.
pub type RecordResult<T> = std::result::Result<T, RecordError>;
