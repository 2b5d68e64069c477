//! Error types for corpus construction

use thiserror::Error;

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Corpus error types
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Metadata contained no records with hour slots
    #[error("metadata is empty: no hour slots observed, nothing to aggregate")]
    EmptyMetadata,

    /// Ignore-list regex failed to compile
    #[error("invalid ignore list: {0}")]
    IgnoreList(#[from] regex::Error),

    /// Metadata file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata file could not be parsed
    #[error("metadata parse error: {0}")]
    Json(#[from] serde_json::Error),
}
