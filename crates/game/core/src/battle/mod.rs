//! Combat state machine.
//!
//! [`CombatEngine`] drives one battle from start to win/loss. It consumes
//! player decisions (actor, action, target) through the command methods,
//! synthesizes enemy decisions when a round executes, and resolves one
//! queued action per [`CombatEngine::advance`] call so the caller can pace
//! the presentation between ticks. The engine never sleeps or blocks;
//! player-facing phases simply wait for the next command call.
//!
//! Phase flow:
//!
//! ```text
//! WaitForActor -> CommandInput -> TargetSelection
//!      ^                               |  (repeat until every commandable
//!      +-------------------------------+   actor has queued an action)
//!                   v
//!          BattleExecution -> RoundOver -> WaitForActor | BattleEnded
//! ```

mod command;
mod errors;
mod execution;

pub use errors::CommandError;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::growth::LevelUpEvent;
use crate::notifier::BattleNotifier;
use crate::rng::{RngOracle, compute_seed};
use crate::unit::{CharacterUnit, Side, UnitId};

/// What a queued action does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[derive(serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Skill,
    Ultimate,
}

/// State machine phase of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum BattlePhase {
    /// Waiting for the player to pick which ally to command.
    WaitForActor,
    /// Waiting for an action choice for the selected ally.
    CommandInput,
    /// Waiting for a target for the chosen action.
    TargetSelection,
    /// Draining the action queue, one action per tick.
    BattleExecution,
    /// Queue drained; end conditions are checked on the next tick.
    RoundOver,
    /// Terminal. [`CombatEngine::outcome`] is set.
    BattleEnded,
}

/// Final result of a battle. Sticky: once set it is never overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// One committed action, alive only for the round it was queued in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueuedAction {
    actor: UnitId,
    kind: ActionKind,
    target: UnitId,
}

/// What one `advance` tick did, so the caller can pace the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineSignal {
    /// A player-facing phase; the engine is blocked on command input.
    AwaitingInput,
    /// One queued action resolved damage. Callers usually delay here.
    ActionExecuted,
    /// A queued action was dropped (dead actor or no valid target left).
    ActionDiscarded,
    /// The round's queue drained; end conditions are checked next tick.
    RoundEnded,
    /// The battle is over; see [`CombatEngine::outcome`].
    BattleOver,
}

/// Turn-based battle engine over a fixed table of units.
///
/// Single-threaded and poll-driven: an external loop calls the command
/// methods while a player-facing phase is active, and [`advance`] once per
/// tick otherwise. All randomness is drawn from the injected oracle.
///
/// [`advance`]: CombatEngine::advance
pub struct CombatEngine {
    units: Vec<CharacterUnit>,
    /// Floor being fought, used for victory rewards.
    floor: u32,
    phase: BattlePhase,
    /// Living player units that still owe an action this round.
    commandable: Vec<UnitId>,
    /// Actor currently being commanded (CommandInput / TargetSelection).
    current_actor: Option<UnitId>,
    /// Action chosen for the current actor, pending a target.
    pending_kind: Option<ActionKind>,
    /// Player actions committed this round, in submission order.
    player_actions: Vec<QueuedAction>,
    queue: VecDeque<QueuedAction>,
    outcome: Option<Outcome>,
    level_up_log: Vec<(UnitId, LevelUpEvent)>,
    notifier: Arc<dyn BattleNotifier>,
    rng: Arc<dyn RngOracle>,
    seed: u64,
    draws: u64,
}

impl CombatEngine {
    /// Build an engine over the given units and start the first round.
    pub fn new(
        units: Vec<CharacterUnit>,
        floor: u32,
        seed: u64,
        rng: Arc<dyn RngOracle>,
        notifier: Arc<dyn BattleNotifier>,
    ) -> Self {
        let mut engine = Self {
            units,
            floor,
            phase: BattlePhase::WaitForActor,
            commandable: Vec::new(),
            current_actor: None,
            pending_kind: None,
            player_actions: Vec::new(),
            queue: VecDeque::new(),
            outcome: None,
            level_up_log: Vec::new(),
            notifier,
            rng,
            seed,
            draws: 0,
        };
        engine.start_command_round();
        engine
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn units(&self) -> &[CharacterUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&CharacterUnit> {
        self.units.get(id.0 as usize)
    }

    /// Living player units that still owe an action this round.
    pub fn commandable(&self) -> &[UnitId] {
        &self.commandable
    }

    /// Actor currently being commanded, if any.
    pub fn current_actor(&self) -> Option<UnitId> {
        self.current_actor
    }

    /// Level-ups granted by victory processing, in award order.
    pub fn level_up_log(&self) -> &[(UnitId, LevelUpEvent)] {
        &self.level_up_log
    }

    /// Perform at most one state transition or queued-action execution.
    ///
    /// The returned signal tells the caller what happened; any pacing
    /// delay between ticks is the caller's concern.
    pub fn advance(&mut self) -> EngineSignal {
        match self.phase {
            BattlePhase::WaitForActor
            | BattlePhase::CommandInput
            | BattlePhase::TargetSelection => EngineSignal::AwaitingInput,

            BattlePhase::BattleExecution => match self.queue.pop_front() {
                Some(action) => {
                    if self.execute_action(action) {
                        EngineSignal::ActionExecuted
                    } else {
                        EngineSignal::ActionDiscarded
                    }
                }
                None => {
                    self.phase = BattlePhase::RoundOver;
                    EngineSignal::RoundEnded
                }
            },

            BattlePhase::RoundOver => {
                if self.check_battle_end() {
                    EngineSignal::BattleOver
                } else {
                    self.start_command_round();
                    EngineSignal::AwaitingInput
                }
            }

            BattlePhase::BattleEnded => EngineSignal::BattleOver,
        }
    }

    pub(crate) fn living_ids(&self, side: Side) -> Vec<UnitId> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.side == side && u.is_alive())
            .map(|(i, _)| UnitId(i as u32))
            .collect()
    }

    /// Next seed from the per-battle draw stream.
    pub(crate) fn draw_seed(&mut self, context: u32) -> u64 {
        self.draws += 1;
        compute_seed(self.seed, self.draws, context)
    }
}
