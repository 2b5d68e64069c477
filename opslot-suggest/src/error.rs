//! Error types for suggestion scoring

use thiserror::Error;

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, SuggestError>;

/// Scoring error types
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Log-probability row is not aligned with the token ranking
    #[error("log-probability row has length {got}, vocabulary has {expected}")]
    VocabMismatch { expected: usize, got: usize },

    /// Weight vector is not aligned with the query tokens
    #[error("weight vector has length {got}, query has {expected} tokens")]
    WeightMismatch { expected: usize, got: usize },
}
