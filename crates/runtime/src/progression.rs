//! Writes experience and level-ups back to storage.

use ascent_content::CharacterCatalog;
use ascent_core::growth::{LevelUpEvent, gain_experience};
use ascent_core::stage::StageInfo;
use ascent_core::unit::{CharacterUnit, Side};

use crate::encounter::roster_unit;
use crate::error::Result;
use crate::repository::{RepositoryError, RunStateRepository, StatTotals};

/// Tickets credited for clearing a floor.
const BOSS_FLOOR_TICKETS: u32 = 5;
const NORMAL_FLOOR_TICKETS: u32 = 1;

/// Applies experience to roster characters and persists the result.
pub struct ProgressionService<'a> {
    repo: &'a dyn RunStateRepository,
    characters: &'a CharacterCatalog,
}

impl<'a> ProgressionService<'a> {
    pub fn new(repo: &'a dyn RunStateRepository, characters: &'a CharacterCatalog) -> Self {
        Self { repo, characters }
    }

    /// Grant permanent experience to one roster character outside battle.
    ///
    /// Level/exp are always persisted; permanent stat totals only when a
    /// level-up fired. Returns the level-up events, one per level gained.
    pub fn grant_exp(&self, char_id: u32, amount: u32) -> Result<Vec<LevelUpEvent>> {
        let record = self.repo.load()?;
        let entry = record
            .entry(char_id)
            .ok_or(RepositoryError::UnknownCharacter(char_id))?;
        let template = self.characters.by_id(char_id)?;

        let mut unit = roster_unit(entry, template);
        let events = gain_experience(&mut unit, amount);

        if events.is_empty() {
            self.repo.save_exp(char_id, unit.level, unit.exp)?;
        } else {
            self.repo
                .save_progression(char_id, unit.level, unit.exp, totals_of(&unit))?;
            tracing::info!(
                char_id,
                level = unit.level,
                gained = events.len(),
                "character leveled up"
            );
        }
        Ok(events)
    }

    /// Persist level/exp for every player unit after a battle in which
    /// the engine already applied victory rewards. Permanent stat totals
    /// are written only for units that gained a level; everyone else
    /// keeps their stored totals (or the base-stat fallback) untouched.
    pub fn persist_survivors(&self, units: &[CharacterUnit]) -> Result<()> {
        let record = self.repo.load()?;
        for unit in units.iter().filter(|u| u.side == Side::Player) {
            let Some(char_id) = unit.roster_id else {
                continue;
            };
            let stored_level = record
                .entry(char_id)
                .ok_or(RepositoryError::UnknownCharacter(char_id))?
                .level;

            if unit.level > stored_level {
                self.repo
                    .save_progression(char_id, unit.level, unit.exp, totals_of(unit))?;
            } else {
                self.repo.save_exp(char_id, unit.level, unit.exp)?;
            }
        }
        Ok(())
    }

    /// Credit the floor-clear ticket reward. Returns the amount granted.
    pub fn grant_floor_reward(&self, stage: &StageInfo) -> Result<u32> {
        let amount = if stage.is_boss_floor {
            BOSS_FLOOR_TICKETS
        } else {
            NORMAL_FLOOR_TICKETS
        };
        let total = self.repo.add_tickets(amount)?;
        tracing::info!(floor = stage.floor, amount, total, "tickets granted");
        Ok(amount)
    }
}

fn totals_of(unit: &CharacterUnit) -> StatTotals {
    StatTotals {
        max_hp: unit.max_hp,
        atk: unit.atk,
        agi: unit.agi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascent_content::{CharacterCatalog, CharacterTemplate};
    use ascent_core::unit::Grade;

    use crate::repository::{InMemoryRunStateRepo, RosterEntry, RunRecord};

    fn catalog() -> CharacterCatalog {
        CharacterCatalog::new(vec![CharacterTemplate {
            id: 1,
            name: "Aldric".into(),
            grade: Grade::Rare,
            hp: 100,
            mp: 50,
            sp_max: 100,
            atk: 20,
            agi: 10,
            skill_name: "Cleave".into(),
            ultimate_name: "Judgement".into(),
        }])
    }

    fn survivor(level: u32, exp: u32) -> CharacterUnit {
        CharacterUnit {
            name: "Aldric".into(),
            grade: Grade::Rare,
            side: Side::Player,
            roster_id: Some(1),
            hp: 80,
            max_hp: 103,
            mp: 30,
            max_mp: 50,
            sp: 20,
            max_sp: 100,
            atk: 21,
            agi: 12,
            level,
            exp,
            skill_name: String::new(),
            ultimate_name: String::new(),
        }
    }

    #[test]
    fn survivors_without_level_ups_keep_totals_unset() {
        let repo =
            InMemoryRunStateRepo::new(RunRecord::new(vec![RosterEntry::new(1).selected()]));
        let characters = catalog();
        let progression = ProgressionService::new(&repo, &characters);

        progression.persist_survivors(&[survivor(1, 10)]).unwrap();

        let entry = repo.load().unwrap().entry(1).cloned().unwrap();
        assert_eq!(entry.level, 1);
        assert_eq!(entry.exp, 10);
        assert_eq!(entry.total_max_hp, None);
        assert_eq!(entry.total_atk, None);
        assert_eq!(entry.total_agi, None);
    }

    #[test]
    fn leveled_survivors_get_permanent_totals_written() {
        let repo =
            InMemoryRunStateRepo::new(RunRecord::new(vec![RosterEntry::new(1).selected()]));
        let characters = catalog();
        let progression = ProgressionService::new(&repo, &characters);

        progression.persist_survivors(&[survivor(2, 40)]).unwrap();

        let entry = repo.load().unwrap().entry(1).cloned().unwrap();
        assert_eq!(entry.level, 2);
        assert_eq!(entry.exp, 40);
        assert_eq!(entry.total_max_hp, Some(103));
        assert_eq!(entry.total_atk, Some(21));
        assert_eq!(entry.total_agi, Some(12));
    }
}
