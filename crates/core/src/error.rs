//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file size {size} exceeds the {max} byte limit (5MB)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("invalid file type {mime}. Allowed: {}", .allowed.join(", "))]
    TypeNotAllowed { mime: String, allowed: Vec<String> },

    #[error("invalid document path: {0}")]
    InvalidPath(String),

    #[error("unknown document kind: {0} (expected photo, certificate or id-proof)")]
    UnknownKind(String),

    #[error("unknown student field: {0}")]
    UnknownField(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("empty patch: at least one field must be set")]
    EmptyPatch,

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
