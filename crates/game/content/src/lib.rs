//! Data-driven content definitions and loaders.
//!
//! This crate houses the static catalogs the run draws encounters from:
//! - roster character templates (base stats per character)
//! - enemy templates, queryable by (biome, tier, role)
//!
//! Catalogs are plain data consumed by the runtime; they never appear in
//! battle state. Loaders read them from RON files.

pub mod catalog;
pub mod loaders;

pub use catalog::{
    CatalogError, CharacterCatalog, CharacterTemplate, EnemyCatalog, EnemyTemplate, Role,
};
pub use loaders::{CharacterLoader, EnemyLoader, LoadResult};
