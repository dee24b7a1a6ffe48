//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Rejected by the upload policy before any network call.
    #[error(transparent)]
    Rejected(#[from] vrnt_core::Error),

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the object store, body passed through verbatim.
    #[error("store error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to generate public URL: {0}")]
    PublicUrl(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StorageError {
    /// True when the error was raised locally, before any write was attempted.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::InvalidPath(_))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
