//! Catalog types and encounter template selection.
//!
//! The enemy catalog is queried by (biome, tier, role). Boss lookups fall
//! back through an explicit ordered list of strategies: fixed boss id,
//! exact-tier boss, any-tier boss in the same biome, and finally ordinary
//! mobs. The first strategy that matches anything wins; if every strategy
//! comes up empty the catalog has no encounter data for the stage and
//! that is an error the caller must handle.

use ascent_core::rng::{RngOracle, compute_seed};
use ascent_core::stage::StageInfo;
use ascent_core::unit::Grade;

/// Combat role of an enemy template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString)]
#[derive(serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Mob,
    Boss,
}

/// One enemy row from the catalog.
///
/// Base hp/atk are reference values; the encounter assembler overrides
/// them with the floor-scaled power curve at spawn time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EnemyTemplate {
    pub id: u32,
    pub name: String,
    pub biome: String,
    pub tier: u8,
    pub role: Role,
    pub hp: u32,
    pub mp: u32,
    pub sp_max: u32,
    pub atk: u32,
    pub agi: u32,
}

/// One roster character row: base stats used when no permanent growth
/// totals have been recorded yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CharacterTemplate {
    pub id: u32,
    pub name: String,
    pub grade: Grade,
    pub hp: u32,
    pub mp: u32,
    pub sp_max: u32,
    pub atk: u32,
    pub agi: u32,
    pub skill_name: String,
    pub ultimate_name: String,
}

/// Raised when the fallback cascade finds nothing for a stage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("no encounter data for biome '{biome}' tier {tier}")]
    NoEncounterData { biome: String, tier: u8 },

    #[error("unknown roster character id {0}")]
    UnknownCharacter(u32),
}

/// Ordered lookup steps for one stage, evaluated in sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LookupStrategy {
    /// Scripted boss by exact catalog id.
    FixedBoss(u32),
    /// One random boss matching biome and tier.
    TierBoss,
    /// The lowest-tier boss of the biome, any tier.
    AnyTierBoss,
    /// Two random ordinary mobs matching biome and tier.
    TierMobs,
}

/// Queryable set of enemy templates.
#[derive(Clone, Debug, Default)]
pub struct EnemyCatalog {
    templates: Vec<EnemyTemplate>,
}

impl EnemyCatalog {
    pub fn new(templates: Vec<EnemyTemplate>) -> Self {
        Self { templates }
    }

    pub fn by_id(&self, id: u32) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Pick the enemy templates for a stage.
    ///
    /// Boss floors yield exactly one template, normal floors two mobs
    /// (fewer only if the catalog itself holds fewer). Random picks are
    /// drawn from the oracle so a run seed reproduces its encounters.
    pub fn select_encounter(
        &self,
        stage: &StageInfo,
        rng: &dyn RngOracle,
        seed: u64,
    ) -> Result<Vec<&EnemyTemplate>, CatalogError> {
        for (step, strategy) in self.strategies(stage).into_iter().enumerate() {
            let picks = self.evaluate(strategy, stage, rng, compute_seed(seed, step as u64, 0));
            if !picks.is_empty() {
                return Ok(picks);
            }
        }

        Err(CatalogError::NoEncounterData {
            biome: stage.biome.clone(),
            tier: stage.tier,
        })
    }

    fn strategies(&self, stage: &StageInfo) -> Vec<LookupStrategy> {
        let mut strategies = Vec::new();
        if let Some(id) = stage.fixed_boss_id {
            strategies.push(LookupStrategy::FixedBoss(id));
        }
        if stage.is_boss_floor {
            strategies.push(LookupStrategy::TierBoss);
            strategies.push(LookupStrategy::AnyTierBoss);
        }
        strategies.push(LookupStrategy::TierMobs);
        strategies
    }

    fn evaluate(
        &self,
        strategy: LookupStrategy,
        stage: &StageInfo,
        rng: &dyn RngOracle,
        seed: u64,
    ) -> Vec<&EnemyTemplate> {
        match strategy {
            LookupStrategy::FixedBoss(id) => self.by_id(id).into_iter().collect(),

            LookupStrategy::TierBoss => {
                let matches: Vec<_> = self
                    .templates
                    .iter()
                    .filter(|t| t.biome == stage.biome && t.tier == stage.tier)
                    .filter(|t| t.role == Role::Boss)
                    .collect();
                pick_one(&matches, rng, seed).into_iter().collect()
            }

            LookupStrategy::AnyTierBoss => self
                .templates
                .iter()
                .filter(|t| t.biome == stage.biome && t.role == Role::Boss)
                .min_by_key(|t| t.tier)
                .into_iter()
                .collect(),

            LookupStrategy::TierMobs => {
                let matches: Vec<_> = self
                    .templates
                    .iter()
                    .filter(|t| t.biome == stage.biome && t.tier == stage.tier)
                    .filter(|t| t.role == Role::Mob)
                    .collect();
                pick_two_distinct(&matches, rng, seed)
            }
        }
    }
}

/// Uniform pick of one template.
fn pick_one<'a>(
    matches: &[&'a EnemyTemplate],
    rng: &dyn RngOracle,
    seed: u64,
) -> Option<&'a EnemyTemplate> {
    rng.pick_index(seed, matches.len()).map(|i| matches[i])
}

/// Uniform pick of two distinct templates (one, if only one matches).
fn pick_two_distinct<'a>(
    matches: &[&'a EnemyTemplate],
    rng: &dyn RngOracle,
    seed: u64,
) -> Vec<&'a EnemyTemplate> {
    let Some(first) = rng.pick_index(compute_seed(seed, 0, 1), matches.len()) else {
        return Vec::new();
    };
    if matches.len() == 1 {
        return vec![matches[first]];
    }

    // draw the second from the remaining slots
    let mut second = rng
        .pick_index(compute_seed(seed, 1, 1), matches.len() - 1)
        .unwrap_or(0);
    if second >= first {
        second += 1;
    }
    vec![matches[first], matches[second]]
}

/// Queryable set of roster character templates.
#[derive(Clone, Debug, Default)]
pub struct CharacterCatalog {
    templates: Vec<CharacterTemplate>,
}

impl CharacterCatalog {
    pub fn new(templates: Vec<CharacterTemplate>) -> Self {
        Self { templates }
    }

    pub fn by_id(&self, id: u32) -> Result<&CharacterTemplate, CatalogError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or(CatalogError::UnknownCharacter(id))
    }
}
