//! In-memory RunStateRepository implementation for tests and local runs.

use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::RunStateRepository;
use super::types::{RosterEntry, RunRecord, StatTotals, TransientSnapshot};

/// In-memory implementation of [`RunStateRepository`].
pub struct InMemoryRunStateRepo {
    record: RwLock<RunRecord>,
}

impl InMemoryRunStateRepo {
    pub fn new(record: RunRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut RunRecord) -> Result<T>) -> Result<T> {
        let mut record = self
            .record
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        f(&mut record)
    }

    fn update_entry(
        &self,
        char_id: u32,
        f: impl FnOnce(&mut RosterEntry),
    ) -> Result<()> {
        self.mutate(|record| {
            let entry = record
                .entry_mut(char_id)
                .ok_or(RepositoryError::UnknownCharacter(char_id))?;
            f(entry);
            Ok(())
        })
    }
}

impl RunStateRepository for InMemoryRunStateRepo {
    fn load(&self) -> Result<RunRecord> {
        let record = self
            .record
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(record.clone())
    }

    fn save_floor(&self, floor: u32) -> Result<()> {
        self.mutate(|record| {
            record.current_floor = floor;
            Ok(())
        })
    }

    fn save_transients(&self, snapshots: &[TransientSnapshot]) -> Result<()> {
        self.mutate(|record| {
            for snapshot in snapshots {
                let entry = record
                    .entry_mut(snapshot.char_id)
                    .ok_or(RepositoryError::UnknownCharacter(snapshot.char_id))?;
                entry.current_hp = Some(snapshot.hp);
                entry.current_mp = Some(snapshot.mp);
                entry.current_sp = Some(snapshot.sp);
            }
            Ok(())
        })
    }

    fn save_progression(
        &self,
        char_id: u32,
        level: u32,
        exp: u32,
        totals: StatTotals,
    ) -> Result<()> {
        self.update_entry(char_id, |entry| {
            entry.level = level;
            entry.exp = exp;
            entry.total_max_hp = Some(totals.max_hp);
            entry.total_atk = Some(totals.atk);
            entry.total_agi = Some(totals.agi);
        })
    }

    fn save_exp(&self, char_id: u32, level: u32, exp: u32) -> Result<()> {
        self.update_entry(char_id, |entry| {
            entry.level = level;
            entry.exp = exp;
        })
    }

    fn add_tickets(&self, amount: u32) -> Result<u32> {
        self.mutate(|record| {
            record.tickets += amount;
            Ok(record.tickets)
        })
    }

    fn start_new_run(&self) -> Result<()> {
        self.mutate(|record| {
            record.current_floor = 1;
            for entry in &mut record.roster {
                entry.clear_transients();
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryRunStateRepo {
        InMemoryRunStateRepo::new(RunRecord::new(vec![
            RosterEntry::new(1).selected(),
            RosterEntry::new(2),
        ]))
    }

    #[test]
    fn transients_round_trip() {
        let repo = repo();
        repo.save_transients(&[TransientSnapshot {
            char_id: 1,
            hp: 33,
            mp: 40,
            sp: 10,
        }])
        .unwrap();

        let record = repo.load().unwrap();
        let entry = record.entry(1).unwrap();
        assert_eq!(entry.current_hp, Some(33));
        assert_eq!(entry.current_mp, Some(40));
        assert_eq!(entry.current_sp, Some(10));
    }

    #[test]
    fn unknown_character_is_rejected() {
        let repo = repo();
        let err = repo.save_exp(99, 2, 0).unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownCharacter(99)));
    }

    #[test]
    fn progression_writes_totals_and_save_exp_does_not() {
        let repo = repo();
        repo.save_exp(1, 1, 50).unwrap();
        assert_eq!(repo.load().unwrap().entry(1).unwrap().total_max_hp, None);

        repo.save_progression(
            1,
            2,
            0,
            StatTotals {
                max_hp: 130,
                atk: 25,
                agi: 12,
            },
        )
        .unwrap();
        let record = repo.load().unwrap();
        let entry = record.entry(1).unwrap();
        assert_eq!(entry.level, 2);
        assert_eq!(entry.total_max_hp, Some(130));
        assert_eq!(entry.total_atk, Some(25));
        assert_eq!(entry.total_agi, Some(12));
    }

    #[test]
    fn new_run_resets_floor_and_transients_but_keeps_progression() {
        let repo = repo();
        repo.save_floor(42).unwrap();
        repo.save_exp(1, 7, 300).unwrap();
        repo.save_transients(&[TransientSnapshot {
            char_id: 1,
            hp: 5,
            mp: 0,
            sp: 80,
        }])
        .unwrap();
        repo.add_tickets(9).unwrap();

        repo.start_new_run().unwrap();

        let record = repo.load().unwrap();
        assert_eq!(record.current_floor, 1);
        assert_eq!(record.tickets, 9);
        let entry = record.entry(1).unwrap();
        assert_eq!(entry.level, 7);
        assert_eq!(entry.current_hp, None);
        assert_eq!(entry.current_sp, None);
    }

    #[test]
    fn tickets_accumulate() {
        let repo = repo();
        assert_eq!(repo.add_tickets(1).unwrap(), 1);
        assert_eq!(repo.add_tickets(5).unwrap(), 6);
    }
}
