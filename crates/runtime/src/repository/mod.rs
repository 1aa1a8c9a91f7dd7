//! Run-state persistence: record types, the repository contract, and the
//! in-memory and file-backed implementations.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{RepositoryError, Result};
pub use file::FileRunStateRepo;
pub use memory::InMemoryRunStateRepo;
pub use traits::RunStateRepository;
pub use types::{RosterEntry, RunRecord, StatTotals, TransientSnapshot};
