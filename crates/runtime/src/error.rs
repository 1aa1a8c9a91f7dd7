//! Runtime-level error type.

use ascent_content::CatalogError;
use ascent_core::StageError;
use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors surfaced by the encounter assembler and progression service.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No roster characters are selected for the run. The calling layer
    /// is expected to substitute a default party, not crash.
    #[error("no roster characters selected for the run")]
    NoParty,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Stage(#[from] StageError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
