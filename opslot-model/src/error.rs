//! Error types for model fitting and persistence

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Model error types
#[derive(Error, Debug)]
pub enum ModelError {
    /// Topic count must be at least 1
    #[error("invalid topic count: {got} (must be >= 1)")]
    InvalidTopicCount { got: usize },

    /// Iteration count must be at least 1
    #[error("invalid iteration count: {got} (must be >= 1)")]
    InvalidIterations { got: usize },

    /// Document-term matrix has no rows or no columns
    #[error("document-term matrix is empty ({rows}x{cols})")]
    EmptyMatrix { rows: usize, cols: usize },

    /// Vector/matrix dimensions disagree with the vocabulary or topic count
    #[error("shape mismatch: expected length {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Model file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model file could not be (de)serialized
    #[error("model serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
