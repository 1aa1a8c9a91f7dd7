//! Runtime glue around the core rules: run-state persistence, encounter
//! assembly, and the progression service that writes level-ups back to
//! storage.

pub mod encounter;
pub mod error;
pub mod progression;
pub mod repository;

pub use encounter::{EncounterAssembler, PARTY_CAP, PartySource};
pub use error::{Result, RuntimeError};
pub use progression::ProgressionService;
pub use repository::{
    FileRunStateRepo, InMemoryRunStateRepo, RepositoryError, RosterEntry, RunRecord,
    RunStateRepository, StatTotals, TransientSnapshot,
};
