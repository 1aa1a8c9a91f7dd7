//! Repository contract for saving and loading mutable run state.

use super::error::Result;
use super::types::{RunRecord, StatTotals, TransientSnapshot};

/// Persistence contract for one run's mutable state.
///
/// Reads return the whole record; writes are scoped to what changed:
/// - current floor on floor transitions
/// - transient hp/mp/sp per player unit on floor transitions or explicit
///   save-and-exit
/// - level/exp (plus permanent totals when a level-up fired) per roster
///   character
pub trait RunStateRepository: Send + Sync {
    /// Load the full run record.
    fn load(&self) -> Result<RunRecord>;

    /// Persist the current floor number.
    fn save_floor(&self, floor: u32) -> Result<()>;

    /// Persist transient meters for the given roster characters.
    fn save_transients(&self, snapshots: &[TransientSnapshot]) -> Result<()>;

    /// Persist level/exp together with permanent stat totals. Called when
    /// a level-up occurred.
    fn save_progression(
        &self,
        char_id: u32,
        level: u32,
        exp: u32,
        totals: StatTotals,
    ) -> Result<()>;

    /// Persist level/exp without touching permanent totals.
    fn save_exp(&self, char_id: u32, level: u32, exp: u32) -> Result<()>;

    /// Credit floor-clear tickets. Returns the new balance.
    fn add_tickets(&self, amount: u32) -> Result<u32>;

    /// Reset the run to floor 1 and clear every transient snapshot.
    /// Progression (level/exp/totals) and tickets survive the reset.
    fn start_new_run(&self) -> Result<()>;
}
