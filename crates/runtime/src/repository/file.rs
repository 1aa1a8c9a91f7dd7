//! File-based RunStateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::traits::RunStateRepository;
use super::types::{RunRecord, StatTotals, TransientSnapshot};

/// File-based implementation of [`RunStateRepository`].
///
/// The whole run record lives in one JSON file so saves stay
/// human-inspectable. Every write rewrites the file through a temp file
/// and an atomic rename.
#[derive(Debug)]
pub struct FileRunStateRepo {
    path: PathBuf,
}

impl FileRunStateRepo {
    /// Create the save file with an initial record, replacing any
    /// existing one.
    pub fn create(path: impl AsRef<Path>, record: &RunRecord) -> Result<Self> {
        let repo = Self {
            path: path.as_ref().to_path_buf(),
        };
        if let Some(parent) = repo.path.parent() {
            fs::create_dir_all(parent)?;
        }
        repo.write_record(record)?;
        Ok(repo)
    }

    /// Open an existing save file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(RepositoryError::MissingRecord(path.display().to_string()));
        }
        Ok(Self { path })
    }

    fn read_record(&self) -> Result<RunRecord> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    fn write_record(&self, record: &RunRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved run record to {}", self.path.display());
        Ok(())
    }

    fn mutate(&self, f: impl FnOnce(&mut RunRecord) -> Result<()>) -> Result<()> {
        let mut record = self.read_record()?;
        f(&mut record)?;
        self.write_record(&record)
    }
}

impl RunStateRepository for FileRunStateRepo {
    fn load(&self) -> Result<RunRecord> {
        self.read_record()
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
        self.mutate(|record| {
            let entry = record
                .entry_mut(char_id)
                .ok_or(RepositoryError::UnknownCharacter(char_id))?;
            entry.level = level;
            entry.exp = exp;
            entry.total_max_hp = Some(totals.max_hp);
            entry.total_atk = Some(totals.atk);
            entry.total_agi = Some(totals.agi);
            Ok(())
        })
    }

    fn save_exp(&self, char_id: u32, level: u32, exp: u32) -> Result<()> {
        self.mutate(|record| {
            let entry = record
                .entry_mut(char_id)
                .ok_or(RepositoryError::UnknownCharacter(char_id))?;
            entry.level = level;
            entry.exp = exp;
            Ok(())
        })
    }

    fn add_tickets(&self, amount: u32) -> Result<u32> {
        let mut record = self.read_record()?;
        record.tickets += amount;
        let total = record.tickets;
        self.write_record(&record)?;
        Ok(total)
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
    use crate::repository::types::RosterEntry;

    fn sample_record() -> RunRecord {
        RunRecord::new(vec![RosterEntry::new(1).selected(), RosterEntry::new(2)])
    }

    #[test]
    fn create_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let repo = FileRunStateRepo::create(&path, &sample_record()).unwrap();
        repo.save_floor(17).unwrap();

        let reopened = FileRunStateRepo::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap().current_floor, 17);
    }

    #[test]
    fn open_without_a_save_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRunStateRepo::open(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RepositoryError::MissingRecord(_)));
    }

    #[test]
    fn corrupted_save_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, "not json").unwrap();

        let repo = FileRunStateRepo::open(&path).unwrap();
        assert!(matches!(
            repo.load().unwrap_err(),
            RepositoryError::Json(_)
        ));
    }

    #[test]
    fn writes_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let repo = FileRunStateRepo::create(&path, &sample_record()).unwrap();
        repo.save_transients(&[TransientSnapshot {
            char_id: 1,
            hp: 12,
            mp: 34,
            sp: 56,
        }])
        .unwrap();
        repo.add_tickets(5).unwrap();

        let record = FileRunStateRepo::open(&path).unwrap().load().unwrap();
        assert_eq!(record.tickets, 5);
        assert_eq!(record.entry(1).unwrap().current_hp, Some(12));
    }
}
