//! Builds the unit lists for one floor's battle.
//!
//! Player units come from the persisted roster plus the character
//! catalog; enemy units come from the enemy catalog with a floor-scaled
//! power override. The assembler also writes the run state back to
//! storage on floor transitions.

use arrayvec::ArrayVec;

use ascent_content::{CharacterCatalog, CharacterTemplate, EnemyCatalog};
use ascent_core::rng::RngOracle;
use ascent_core::stage::StageGenerator;
use ascent_core::unit::{CharacterUnit, Grade, Side};

use crate::error::{Result, RuntimeError};
use crate::repository::{RosterEntry, RunStateRepository, TransientSnapshot};

/// Hard cap on simultaneously selected party members.
pub const PARTY_CAP: usize = 2;

/// Floor-scaled enemy power curve.
const ENEMY_HP_PER_FLOOR: u32 = 100;
const ENEMY_ATK_PER_FLOOR: u32 = 10;

/// Where the party for the next floor comes from.
///
/// Floor transitions inside a run pass the previous battle's units
/// explicitly instead of smuggling them through shared session state.
pub enum PartySource {
    /// Reset the run to floor 1, then load the party fresh from storage.
    NewRun,
    /// Load the party fresh from storage at the persisted floor.
    Continue,
    /// Reuse these units from the previous floor's battle.
    InMemory(Vec<CharacterUnit>),
}

/// Assembles battle units from storage and catalogs.
pub struct EncounterAssembler<'a> {
    repo: &'a dyn RunStateRepository,
    characters: &'a CharacterCatalog,
    enemies: &'a EnemyCatalog,
    stages: &'a StageGenerator,
    rng: &'a dyn RngOracle,
}

impl<'a> EncounterAssembler<'a> {
    pub fn new(
        repo: &'a dyn RunStateRepository,
        characters: &'a CharacterCatalog,
        enemies: &'a EnemyCatalog,
        stages: &'a StageGenerator,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            repo,
            characters,
            enemies,
            stages,
            rng,
        }
    }

    /// Build the player party for the floor about to be entered.
    ///
    /// Effective stats are the persisted permanent totals, falling back
    /// to catalog base stats when no total was ever recorded. HP carries
    /// over from the last transient snapshot unless it is absent or 0,
    /// the floor is a boss floor, or a new run is starting; in those
    /// cases it resets to full. MP always resets to full and SP to 0.
    pub fn load_party(&self, source: PartySource) -> Result<(Vec<CharacterUnit>, u32)> {
        let (baton, new_run) = match source {
            PartySource::NewRun => {
                self.repo.start_new_run()?;
                (None, true)
            }
            PartySource::Continue => (None, false),
            PartySource::InMemory(units) => (Some(units), false),
        };

        let record = self.repo.load()?;
        let floor = record.current_floor;
        let stage = self.stages.stage_info(floor)?;

        if let Some(mut units) = baton {
            units.retain(|u| u.side == Side::Player);
            if units.is_empty() {
                return Err(RuntimeError::NoParty);
            }
            for unit in &mut units {
                unit.mp = unit.max_mp;
                unit.sp = 0;
                if stage.is_boss_floor || !unit.is_alive() {
                    unit.hp = unit.max_hp;
                }
            }
            tracing::debug!(floor, party = units.len(), "party carried in memory");
            return Ok((units, floor));
        }

        let mut party: ArrayVec<CharacterUnit, PARTY_CAP> = ArrayVec::new();
        for entry in record.selected().take(PARTY_CAP) {
            let template = self.characters.by_id(entry.char_id)?;
            let mut unit = roster_unit(entry, template);

            if !new_run && !stage.is_boss_floor {
                if let Some(hp) = entry.current_hp.filter(|hp| *hp > 0) {
                    unit.hp = hp.min(unit.max_hp);
                }
            }
            party.push(unit);
        }

        if party.is_empty() {
            return Err(RuntimeError::NoParty);
        }

        tracing::info!(floor, party = party.len(), "party assembled from storage");
        Ok((party.into_iter().collect(), floor))
    }

    /// Spawn this floor's enemies from the catalog.
    ///
    /// HP and ATK are overridden with the deterministic floor curve;
    /// AGI and the resource meters come from the template.
    pub fn spawn_enemies(&self, floor: u32, seed: u64) -> Result<Vec<CharacterUnit>> {
        let stage = self.stages.stage_info(floor)?;
        let picks = self.enemies.select_encounter(&stage, self.rng, seed)?;

        let hp = floor * ENEMY_HP_PER_FLOOR;
        let atk = floor * ENEMY_ATK_PER_FLOOR;
        let units = picks
            .into_iter()
            .map(|template| CharacterUnit {
                name: template.name.clone(),
                // enemies never level, so the grade carries no weight
                grade: Grade::Common,
                side: Side::Enemy,
                roster_id: None,
                hp,
                max_hp: hp,
                mp: template.mp,
                max_mp: template.mp,
                sp: 0,
                max_sp: template.sp_max,
                atk,
                agi: template.agi,
                level: 1,
                exp: 0,
                skill_name: String::new(),
                ultimate_name: String::new(),
            })
            .collect::<Vec<_>>();

        tracing::info!(
            floor,
            biome = %stage.biome,
            enemies = units.len(),
            boss = stage.is_boss_floor,
            "enemies spawned"
        );
        Ok(units)
    }

    /// Persist the floor and every player unit's transient meters.
    pub fn save_run_state(&self, floor: u32, units: &[CharacterUnit]) -> Result<()> {
        self.repo.save_floor(floor)?;

        let snapshots: Vec<TransientSnapshot> = units
            .iter()
            .filter(|u| u.side == Side::Player)
            .filter_map(|u| {
                u.roster_id.map(|char_id| TransientSnapshot {
                    char_id,
                    hp: u.hp,
                    mp: u.mp,
                    sp: u.sp,
                })
            })
            .collect();
        self.repo.save_transients(&snapshots)?;

        tracing::debug!(floor, saved = snapshots.len(), "run state saved");
        Ok(())
    }
}

/// Materialize a roster entry as a fresh combat unit: effective stats
/// with base-stat fallback, full hp/mp, empty sp meter.
pub(crate) fn roster_unit(entry: &RosterEntry, template: &CharacterTemplate) -> CharacterUnit {
    let max_hp = entry.total_max_hp.unwrap_or(template.hp);
    CharacterUnit {
        name: template.name.clone(),
        grade: template.grade,
        side: Side::Player,
        roster_id: Some(entry.char_id),
        hp: max_hp,
        max_hp,
        mp: template.mp,
        max_mp: template.mp,
        sp: 0,
        max_sp: template.sp_max,
        atk: entry.total_atk.unwrap_or(template.atk),
        agi: entry.total_agi.unwrap_or(template.agi),
        level: entry.level,
        exp: entry.exp,
        skill_name: template.skill_name.clone(),
        ultimate_name: template.ultimate_name.clone(),
    }
}
