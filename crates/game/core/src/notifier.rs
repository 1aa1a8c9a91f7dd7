//! Fire-and-forget presentation notifications.
//!
//! The combat engine reports animation-worthy moments (attacks, damage
//! numbers, level-ups) through this trait. Calls are one-way: the engine
//! never consumes a return value, and the core is fully usable with the
//! no-op implementation. Injected at engine construction instead of a
//! process-wide singleton.

use crate::battle::ActionKind;
use crate::growth::LevelUpEvent;
use crate::unit::CharacterUnit;

/// Sink for presentation events produced during a battle.
///
/// All methods default to no-ops so implementors only wire what they show.
pub trait BattleNotifier: Send + Sync {
    /// An actor performed an attack, skill or ultimate.
    fn action_performed(&self, _actor: &CharacterUnit, _kind: ActionKind) {}

    /// A unit took damage (floating combat text).
    fn damage_taken(&self, _unit: &CharacterUnit, _amount: u32) {}

    /// A survivor levelled up during victory rewards.
    fn unit_leveled_up(&self, _unit: &CharacterUnit, _event: &LevelUpEvent) {}
}

/// Notifier that drops every event. Default for headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl BattleNotifier for NoopNotifier {}
