//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in store and corpus handling.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or a document could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule corpus document was structurally valid JSON but unusable.
    #[error("invalid rule corpus: {0}")]
    InvalidCorpus(String),
}
