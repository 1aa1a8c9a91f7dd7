//! Enemy catalog loader.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{EnemyCatalog, EnemyTemplate};
use crate::loaders::{LoadResult, read_file};

/// Loader for the enemy catalog from a RON file.
///
/// RON format: Vec<EnemyTemplate>
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;

        let templates: Vec<EnemyTemplate> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id) {
                anyhow::bail!("Duplicate enemy id {} in {}", template.id, path.display());
            }
        }

        Ok(EnemyCatalog::new(templates))
    }
}
