//! Roster character catalog loader.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{CharacterCatalog, CharacterTemplate};
use crate::loaders::{LoadResult, read_file};

/// Loader for the roster character catalog from a RON file.
///
/// RON format: Vec<CharacterTemplate>
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<CharacterCatalog> {
        let content = read_file(path)?;

        let templates: Vec<CharacterTemplate> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id) {
                anyhow::bail!(
                    "Duplicate character id {} in {}",
                    template.id,
                    path.display()
                );
            }
        }

        Ok(CharacterCatalog::new(templates))
    }
}
