//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repositories and codecs.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("roster line {line}: {reason}")]
    Roster { line: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
