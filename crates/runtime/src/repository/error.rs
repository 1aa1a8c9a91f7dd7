//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("run-state lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("no run record at {0}")]
    MissingRecord(String),

    #[error("unknown roster character id {0}")]
    UnknownCharacter(u32),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
