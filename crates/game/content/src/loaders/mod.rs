//! Content loaders for reading catalogs from files.
//!
//! Loaders convert RON files into the catalog types in [`crate::catalog`].

pub mod characters;
pub mod enemies;

pub use characters::CharacterLoader;
pub use enemies::EnemyLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
